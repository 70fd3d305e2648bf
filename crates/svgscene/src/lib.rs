// SVG subset scene builder
mod builder;
pub mod color;
pub mod geometry;
pub mod render;
pub mod shape;
mod symbols;
pub mod transform;

pub use builder::SceneBuilder;
pub use color::{Color, parse_color};
pub use geometry::Point;
pub use render::{Canvas, Draw, render};
pub use shape::*;
pub use symbols::SymbolTable;
pub use transform::{Transform, TransformList, Transformable};

use roxmltree::Document as XmlDocument;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvgError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to load {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<SvgError>,
    },

    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    #[error("Invalid <{element}>: {reason}")]
    InvalidShape {
        element: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SvgError>;

/// A parsed document: canvas dimensions plus the top-level scene graph
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    pub shapes: Vec<Shape>,
}

impl Document {
    /// Parse a document from an XML string
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = XmlDocument::parse(xml)?;

        let mut builder = SceneBuilder::new();
        builder.build_document(&doc)
    }

    /// Parse a document from file
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let load = || -> Result<Self> {
            let xml = std::fs::read_to_string(path)?;
            Self::parse(&xml)
        };

        load().map_err(|source| SvgError::Load {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Draw every top-level shape in document order
    pub fn render(&self, canvas: &mut dyn Canvas) {
        render(&self.shapes, canvas);
    }
}
