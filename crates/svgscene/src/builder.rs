use crate::color::{Color, parse_color};
use crate::geometry::{Point, parse_number, parse_points};
use crate::shape::*;
use crate::symbols::SymbolTable;
use crate::transform::TransformList;
use crate::{Document, Result};
use roxmltree::{Document as XmlDocument, Node};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Scene builder context: the symbol table for `<use>` resolution
#[derive(Debug, Default)]
pub struct SceneBuilder {
    symbols: SymbolTable,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn build_document(&mut self, doc: &XmlDocument) -> Result<Document> {
        let root = doc.root_element();

        if root.tag_name().name() != "svg" {
            log::warn!(
                "Expected root element 'svg', found '{}'",
                root.tag_name().name()
            );
        }

        let width = self.dimension_attr(&root, "width");
        let height = self.dimension_attr(&root, "height");
        let shapes = self.build_children(&root);

        Ok(Document {
            width,
            height,
            shapes,
        })
    }

    /// Build the shapes for every element child of `node`, in document order
    pub fn build_children(&mut self, node: &Node) -> Vec<Shape> {
        node.children()
            .filter(|n| n.is_element())
            .flat_map(|child| self.build_element(&child))
            .collect()
    }

    /// Shapes produced by one element, after its transform is applied
    fn build_element(&mut self, node: &Node) -> Vec<Shape> {
        let name = node.tag_name().name();

        let built = match name {
            "ellipse" => self.parse_ellipse(node).map(Shape::new),
            "circle" => self.parse_circle(node).map(Shape::new),
            "polyline" => self.parse_polyline(node).map(Shape::new),
            "line" => Ok(Shape::new(self.parse_line(node))),
            "polygon" => self.parse_polygon(node).map(Shape::new),
            "rect" => self.parse_rect(node).map(Shape::new),
            "g" => Ok(Shape::new(Group::new(self.build_children(node)))),
            "use" => {
                let shapes = self.resolve_use(node);
                return self.finish(node, shapes);
            }
            _ => {
                log::debug!("Skipping unsupported element <{}>", name);
                return Vec::new();
            }
        };

        match built {
            Ok(shape) => self.finish(node, vec![shape]),
            Err(e) => {
                log::warn!("Skipping element: {}", e);
                Vec::new()
            }
        }
    }

    /// Apply the node's transform, then tag and register its shapes under its id
    fn finish(&mut self, node: &Node, mut shapes: Vec<Shape>) -> Vec<Shape> {
        if let Some(transform) = self.parse_transform(node) {
            let origin = self.parse_transform_origin(node);
            transform.apply(&mut shapes[..], origin);
        }

        if let Some(id) = node.attribute("id").filter(|id| !id.is_empty()) {
            for shape in &mut shapes {
                shape.id = Some(id.to_string());
            }
            log::debug!("Registering id '{}' ({} shapes)", id, shapes.len());
            self.symbols.register(id, &shapes);
        }

        shapes
    }

    fn resolve_use(&self, node: &Node) -> Vec<Shape> {
        let Some(href) = node
            .attribute("href")
            .or_else(|| node.attribute((XLINK_NS, "href")))
        else {
            log::warn!("<use> without href");
            return Vec::new();
        };

        let id = href.strip_prefix('#').unwrap_or(href);
        if !self.symbols.contains(id) {
            log::warn!("<use> references unknown id '{}'", id);
        }
        self.symbols.resolve(id)
    }

    fn parse_ellipse(&self, node: &Node) -> Result<Ellipse> {
        let center = self.point_attrs(node, "cx", "cy");
        let radius = self.point_attrs(node, "rx", "ry");
        Ellipse::new(self.color_attr(node, "fill"), center, radius)
    }

    fn parse_circle(&self, node: &Node) -> Result<Ellipse> {
        let center = self.point_attrs(node, "cx", "cy");
        let radius = self.int_attr(node, "r");
        Ellipse::circle(self.color_attr(node, "fill"), center, radius)
    }

    fn parse_polyline(&self, node: &Node) -> Result<Polyline> {
        let points = self.points_attr(node, "points");
        Polyline::new(self.color_attr(node, "stroke"), points)
    }

    fn parse_line(&self, node: &Node) -> Polyline {
        let start = self.point_attrs(node, "x1", "y1");
        let end = self.point_attrs(node, "x2", "y2");
        Polyline::line(self.color_attr(node, "stroke"), start, end)
    }

    fn parse_polygon(&self, node: &Node) -> Result<Polygon> {
        let points = self.points_attr(node, "points");
        Polygon::new(self.color_attr(node, "fill"), points)
    }

    fn parse_rect(&self, node: &Node) -> Result<Polygon> {
        let corner = self.point_attrs(node, "x", "y");
        let width = self.int_attr(node, "width");
        let height = self.int_attr(node, "height");
        Polygon::rect(self.color_attr(node, "fill"), corner, width, height)
    }

    fn parse_transform(&self, node: &Node) -> Option<TransformList> {
        let value = node.attribute("transform")?;
        match value.parse() {
            Ok(list) => Some(list),
            Err(e) => {
                log::warn!("Ignoring transform on <{}>: {}", node.tag_name().name(), e);
                None
            }
        }
    }

    fn parse_transform_origin(&self, node: &Node) -> Point {
        let Some(value) = node.attribute("transform-origin") else {
            return Point::ORIGIN;
        };
        value.parse().unwrap_or_else(|e| {
            log::warn!("{}, using (0, 0) as transform origin", e);
            Point::ORIGIN
        })
    }

    /// Integer attribute; missing or malformed values are 0
    fn int_attr(&self, node: &Node, attr: &str) -> i32 {
        let Some(value) = node.attribute(attr) else {
            return 0;
        };
        parse_number(value).unwrap_or_else(|| {
            log::warn!(
                "Invalid number {:?} for '{}' on <{}>, using 0",
                value,
                attr,
                node.tag_name().name()
            );
            0
        })
    }

    fn point_attrs(&self, node: &Node, x: &str, y: &str) -> Point {
        Point::new(self.int_attr(node, x), self.int_attr(node, y))
    }

    fn points_attr(&self, node: &Node, attr: &str) -> Vec<Point> {
        node.attribute(attr).map(parse_points).unwrap_or_default()
    }

    /// Colour attribute; missing or unknown colours are black
    fn color_attr(&self, node: &Node, attr: &str) -> Color {
        let Some(value) = node.attribute(attr) else {
            return Color::BLACK;
        };
        parse_color(value).unwrap_or_else(|| {
            log::warn!(
                "Unknown color {:?} for '{}' on <{}>, using black",
                value,
                attr,
                node.tag_name().name()
            );
            Color::BLACK
        })
    }

    fn dimension_attr(&self, node: &Node, attr: &str) -> u32 {
        let value = self.int_attr(node, attr);
        u32::try_from(value).unwrap_or_else(|_| {
            log::warn!("Negative document {} {}, using 0", attr, value);
            0
        })
    }
}
