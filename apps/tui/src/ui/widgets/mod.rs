pub mod popup;
pub mod scene_canvas;
