//! Sprite batch behavior observed through the recording backend.

use std::sync::Arc;

use tessera_core::math::{Matrix4, Rectangle, Vector2};
use tessera_render::{
    BatchError, BlendMode, Color, DrawBatch, RenderBackend, SpriteBatch, SpriteBatchDescriptor,
    SpriteParams, Texture, TextureHandle,
};
use tessera_test_utils::{BackendCall, MockRenderBackend};

const FLOATS_PER_VERTEX: usize = 8;
const FLOATS_PER_SPRITE: usize = FLOATS_PER_VERTEX * 6;

fn setup(capacity: usize) -> (Arc<MockRenderBackend>, SpriteBatch) {
    let mock = Arc::new(MockRenderBackend::new());
    let backend: Arc<dyn RenderBackend> = mock.clone();
    let batch = SpriteBatch::new(backend, &SpriteBatchDescriptor::with_capacity(capacity))
        .expect("valid capacity");
    (mock, batch)
}

fn texture(id: u64) -> Texture {
    Texture::new(TextureHandle::new(id), 16, 16)
}

/// x of the first vertex (bottom-left) of every sprite in one upload.
fn sprite_xs(upload: &[f32]) -> Vec<f32> {
    upload.chunks_exact(FLOATS_PER_SPRITE).map(|s| s[0]).collect()
}

#[test]
fn test_same_texture_single_draw_call() {
    let (mock, mut batch) = setup(256);
    let tex = texture(1);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    for i in 0..100 {
        batch.draw(&tex, Vector2::new(i as f32, 0.0)).unwrap();
    }
    batch.end().unwrap();

    assert_eq!(mock.count_draw_calls(), 1);
    assert_eq!(mock.triangle_vertex_counts(), vec![600]);
    assert_eq!(mock.bound_textures(), vec![1]);
}

#[test]
fn test_texture_runs_partition_draws() {
    let (mock, mut batch) = setup(256);
    let (a, b) = (texture(10), texture(20));

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    for tex in [&a, &a, &b, &b, &a] {
        batch.draw(tex, Vector2::ZERO).unwrap();
    }
    batch.end().unwrap();

    assert_eq!(mock.triangle_vertex_counts(), vec![12, 12, 6]);
    assert_eq!(mock.bound_textures(), vec![10, 20, 10]);
    assert_eq!(batch.stats().texture_binds, 3);
}

#[test]
fn test_bind_precedes_its_run() {
    let (mock, mut batch) = setup(256);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    batch.draw(&texture(1), Vector2::ZERO).unwrap();
    batch.draw(&texture(2), Vector2::ZERO).unwrap();
    batch.end().unwrap();

    let draws: Vec<_> = mock
        .calls()
        .into_iter()
        .filter(|c| {
            matches!(
                c,
                BackendCall::BindTexture { .. }
                    | BackendCall::UploadVertexData { .. }
                    | BackendCall::DrawTriangles { .. }
            )
        })
        .map(|c| match c {
            BackendCall::BindTexture { texture } => format!("bind {texture}"),
            BackendCall::UploadVertexData { .. } => "upload".to_string(),
            BackendCall::DrawTriangles { vertex_count } => format!("draw {vertex_count}"),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(draws, vec!["bind 1", "upload", "draw 6", "bind 2", "upload", "draw 6"]);
}

#[test]
fn test_capacity_overflow_flushes_mid_session() {
    let (mock, mut batch) = setup(256);
    let tex = texture(1);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    for _ in 0..300 {
        batch.draw(&tex, Vector2::ZERO).unwrap();
    }
    assert_eq!(mock.count_draw_calls(), 1);
    assert_eq!(batch.pending(), 44);
    batch.end().unwrap();

    assert_eq!(mock.triangle_vertex_counts(), vec![256 * 6, 44 * 6]);
    assert_eq!(batch.pending(), 0);
    // The texture stays bound across the overflow flush.
    assert_eq!(mock.count_texture_binds(), 1);

    let stats = batch.stats();
    assert_eq!(stats.sprites, 300);
    assert_eq!(stats.flushes, 2);
}

#[test]
fn test_upload_size_matches_run() {
    let (mock, mut batch) = setup(8);
    let tex = texture(1);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    for _ in 0..3 {
        batch.draw(&tex, Vector2::ZERO).unwrap();
    }
    batch.end().unwrap();

    let uploads = mock.uploaded_floats();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].len(), 3 * FLOATS_PER_SPRITE);
}

#[test]
fn test_depth_sort_orders_vertices() {
    let (mock, mut batch) = setup(256);
    let tex = texture(1);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    for depth in [5, 1, 3] {
        let params = SpriteParams::at(Vector2::new(depth as f32 * 10.0, 0.0)).depth(depth);
        batch.draw_with(&tex, &params).unwrap();
    }
    batch.end().unwrap();

    let uploads = mock.uploaded_floats();
    assert_eq!(uploads.len(), 1);
    assert_eq!(sprite_xs(&uploads[0]), vec![10.0, 30.0, 50.0]);
    assert_eq!(batch.stats().depth_sorts, 1);
}

#[test]
fn test_depth_sort_is_stable() {
    let (mock, mut batch) = setup(256);
    let tex = texture(1);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    // X and Y tie at depth 1 with Z in between them.
    for (x, depth) in [(100.0, 1), (300.0, 2), (200.0, 1)] {
        batch
            .draw_with(&tex, &SpriteParams::at(Vector2::new(x, 0.0)).depth(depth))
            .unwrap();
    }
    batch.end().unwrap();

    assert_eq!(sprite_xs(&mock.uploaded_floats()[0]), vec![100.0, 200.0, 300.0]);
}

#[test]
fn test_equal_depths_keep_submission_order() {
    let (mock, mut batch) = setup(256);
    let tex = texture(1);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    for (x, depth) in [(100.0, 1), (200.0, 1), (300.0, 2)] {
        batch
            .draw_with(&tex, &SpriteParams::at(Vector2::new(x, 0.0)).depth(depth))
            .unwrap();
    }
    batch.end().unwrap();

    assert_eq!(sprite_xs(&mock.uploaded_floats()[0]), vec![100.0, 200.0, 300.0]);
}

#[test]
fn test_uniform_depth_skips_sort() {
    let (_mock, mut batch) = setup(256);
    let tex = texture(1);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    for _ in 0..4 {
        batch
            .draw_with(&tex, &SpriteParams::at(Vector2::ZERO).depth(7))
            .unwrap();
    }
    batch.end().unwrap();

    assert_eq!(batch.stats().depth_sorts, 0);
}

#[test]
fn test_depth_reorders_texture_runs() {
    let (mock, mut batch) = setup(256);
    let (a, b) = (texture(1), texture(2));

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    batch.draw_with(&a, &SpriteParams::at(Vector2::ZERO).depth(0)).unwrap();
    batch.draw_with(&b, &SpriteParams::at(Vector2::ZERO).depth(1)).unwrap();
    batch.draw_with(&a, &SpriteParams::at(Vector2::ZERO).depth(0)).unwrap();
    batch.end().unwrap();

    // Sorting groups both depth-0 sprites of A into one run.
    assert_eq!(mock.bound_textures(), vec![1, 2]);
    assert_eq!(mock.triangle_vertex_counts(), vec![12, 6]);
}

#[test]
fn test_depth_order_holds_per_flush_only() {
    let (mock, mut batch) = setup(2);
    let tex = texture(1);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    for depth in [5, 1, 3] {
        let params = SpriteParams::at(Vector2::new(depth as f32 * 10.0, 0.0)).depth(depth);
        batch.draw_with(&tex, &params).unwrap();
    }
    batch.end().unwrap();

    let uploads = mock.uploaded_floats();
    assert_eq!(sprite_xs(&uploads[0]), vec![10.0, 50.0]);
    assert_eq!(sprite_xs(&uploads[1]), vec![30.0]);
}

#[test]
fn test_empty_session() {
    let (mock, mut batch) = setup(256);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    batch.end().unwrap();

    assert_eq!(mock.count_draw_calls(), 0);
    assert_eq!(mock.count_uploads(), 0);
    assert_eq!(batch.pending(), 0);
    assert!(!batch.is_recording());
    assert_eq!(batch.stats().draw_calls, 0);
}

#[test]
fn test_begin_uploads_view_and_blend() {
    let (mock, mut batch) = setup(256);
    let view = Matrix4::orthographic(0.0, 800.0, 600.0, 0.0, 0.0, 1.0);

    batch.begin(&view, BlendMode::Additive).unwrap();
    batch.end().unwrap();

    assert_eq!(mock.last_view_matrix(), Some(view.to_cols_array()));
    assert_eq!(
        mock.blend_states(),
        vec![
            BlendMode::Additive.to_blend_state(),
            BlendMode::Normal.to_blend_state()
        ]
    );
    assert_eq!(mock.calls().last(), Some(&BackendCall::UnbindVertexState));
}

#[test]
fn test_sessions_are_independent() {
    let (mock, mut batch) = setup(256);
    let tex = texture(1);

    for _ in 0..2 {
        batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
        batch.draw(&tex, Vector2::ZERO).unwrap();
        batch.end().unwrap();
        assert_eq!(batch.stats().draw_calls, 1);
    }

    // The bound texture is forgotten at begin, so each session binds again.
    assert_eq!(mock.bound_textures(), vec![1, 1]);
}

#[test]
fn test_vertex_payload() {
    let (mock, mut batch) = setup(256);
    let tex = Texture::new(TextureHandle::new(1), 64, 32);
    let tint = Color::rgba(0.5, 0.25, 1.0, 0.75);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    batch
        .draw_with(
            &tex,
            &SpriteParams::at(Vector2::new(10.0, 20.0))
                .source(Rectangle::new(32.0, 0.0, 32.0, 16.0))
                .color(tint),
        )
        .unwrap();
    batch.end().unwrap();

    let upload = &mock.uploaded_floats()[0];
    let vertices: Vec<&[f32]> = upload.chunks_exact(FLOATS_PER_VERTEX).collect();
    assert_eq!(vertices.len(), 6);

    // bottom-left, bottom-right, top-left, top-left, bottom-right, top-right
    assert_eq!(vertices[0], &[10.0, 36.0, 0.5, 0.5, 0.5, 0.25, 1.0, 0.75]);
    assert_eq!(vertices[1], &[42.0, 36.0, 1.0, 0.5, 0.5, 0.25, 1.0, 0.75]);
    assert_eq!(vertices[2], &[10.0, 20.0, 0.5, 0.0, 0.5, 0.25, 1.0, 0.75]);
    assert_eq!(vertices[3], vertices[2]);
    assert_eq!(vertices[4], vertices[1]);
    assert_eq!(vertices[5], &[42.0, 20.0, 1.0, 0.0, 0.5, 0.25, 1.0, 0.75]);
}

#[test]
fn test_draw_area_uses_rectangle() {
    let (mock, mut batch) = setup(256);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    batch
        .draw_area(&texture(1), Rectangle::new(5.0, 5.0, 100.0, 50.0))
        .unwrap();
    batch.end().unwrap();

    let upload = &mock.uploaded_floats()[0];
    // top-right vertex
    assert_eq!(&upload[5 * FLOATS_PER_VERTEX..5 * FLOATS_PER_VERTEX + 2], &[105.0, 5.0]);
}

#[test]
fn test_misuse_is_reported() {
    let (mock, mut batch) = setup(4);

    assert_eq!(batch.draw(&texture(1), Vector2::ZERO), Err(BatchError::NotRecording));
    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    assert_eq!(
        batch.begin(&Matrix4::IDENTITY, BlendMode::Normal),
        Err(BatchError::AlreadyRecording)
    );
    batch.end().unwrap();
    assert_eq!(batch.end(), Err(BatchError::NotRecording));

    // Only the successful begin/end pair reached the backend.
    assert_eq!(mock.blend_states().len(), 2);
}

#[test]
fn test_dispose_mid_session_drops_pending() {
    let (mock, mut batch) = setup(4);

    batch.begin(&Matrix4::IDENTITY, BlendMode::Normal).unwrap();
    batch.draw(&texture(1), Vector2::ZERO).unwrap();
    batch.dispose();

    assert_eq!(mock.count_draw_calls(), 0);
    assert!(!batch.is_recording());
    assert_eq!(batch.resize(8), Err(BatchError::Disposed));
}
