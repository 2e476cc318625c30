//! Host-side plugin database
//!
//! Image descriptors, read results, data-file search and an explicit
//! reader/writer registry that format plugins register into at startup.

pub mod file_utils;
pub mod image;
pub mod node;
pub mod options;
pub mod paged;
pub mod read;
pub mod reader_writer;
pub mod registry;
pub mod widget;

pub use file_utils::{find_data_file, lower_case_file_extension};
pub use image::{AllocationMode, DataType, Image, ImageError, Origin, PixelFormat};
pub use node::Node;
pub use options::{ConfigError, Options};
pub use paged::{BoxError, PagedImage};
pub use read::{Object, ReadError, ReadResult};
pub use reader_writer::ReaderWriter;
pub use registry::{ExtensionInfo, Registry};
pub use widget::{AssignError, GeometryHints, PdfReader, TexturedQuad, Vec3};
