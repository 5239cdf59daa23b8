//! Image capability: everything that touches codecs or pixels.
//!
//! | Operation | Where |
//! |---|---|
//! | **Decode** | [`ImageBackend::decode`]: path, bytes, URL, or in-memory image |
//! | **Resize** | [`ImageBackend::resize`]: exact target dimensions |
//! | **Save** | [`ImageBackend::save`]: format from extension |
//! | **Crop / paste / pad** | [`operations`]: exact copies, black fill |
//!
//! The module is split into:
//! - **Parameters**: [`ImageSource`], [`Quality`], [`ResizeFilter`]
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Fetch**: HTTP(S) download for remote sources
//! - **Operations**: pure pixel copies shared by the reconciler and composer

pub mod backend;
pub mod fetch;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use operations::{BLACK, black_canvas, crop_box, pad, paste};
pub use params::{ImageSource, Quality, ResizeFilter};
pub use rust_backend::RustBackend;
