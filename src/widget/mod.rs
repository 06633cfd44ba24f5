//! Content widgets placed inside sections.
//!
//! Third-party players and renderers stay opaque; each widget only produces
//! markup and, where it runs continuously, implements
//! [`ActiveGate`](crate::tracker::ActiveGate) so the tracker can pause it
//! while its section is off screen.

pub mod gallery;
pub mod lab;
pub mod modal;
pub mod model;
pub mod video;
pub mod wobble;

pub use gallery::GalleryItem;
pub use lab::LabEmbed;
pub use modal::{ImageModal, Key, ModalState};
pub use model::{CameraConfig, ModelConfig, ModelViewer, OrbitCamera, TextureCycle};
pub use video::{Aspect, Video, VideoEmbed, YouTube};
pub use wobble::{WobbleConfig, WobblyText};
