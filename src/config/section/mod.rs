//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `build`    | `[build]`      | Output and public directories        |
//! | `sections` | `[[sections]]` | Ordered page sections and bodies     |
//! | `serve`    | `[serve]`      | Development server                   |
//! | `site`     | `[site]`       | Site info and sidebar links          |
//! | `tracker`  | `[tracker]`    | Active-section observer options      |

mod build;
pub mod sections;
mod serve;
mod site;
mod tracker;

pub use build::BuildSectionConfig;
pub use sections::{SectionBody, SectionConfig};
pub use serve::ServeConfig;
pub use site::{LinkConfig, SiteSectionConfig};
pub use tracker::TrackerConfig;
