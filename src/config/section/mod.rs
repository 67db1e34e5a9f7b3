//! Configuration section definitions.
//!
//! Each module corresponds to a section in `livepen.toml`:
//!
//! | Module     | TOML Section   | Purpose                                   |
//! |------------|----------------|-------------------------------------------|
//! | `sources`  | `[sources]`    | Structure, style and behavior file paths  |
//! | `document` | `[document]`   | Document skeleton (title, libraries)      |
//! | `serve`    | `[serve]`      | Development server                        |
//! | `build`    | `[build]`      | One-shot output file                      |

mod build;
mod document;
mod serve;
mod sources;

pub use build::BuildConfig;
pub use document::DocumentConfig;
pub use serve::ServeConfig;
pub use sources::SourcesConfig;
