// Identifier -> shapes registry backing `<use>`
// Entries are owned deep copies; nothing handed out aliases what is stored.

use std::collections::HashMap;

use crate::shape::Shape;

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, Vec<Shape>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store copies of `shapes` under `id`, replacing any previous entry
    pub fn register(&mut self, id: &str, shapes: &[Shape]) {
        if self.entries.insert(id.to_string(), shapes.to_vec()).is_some() {
            log::debug!("Redefined id '{}'", id);
        }
    }

    /// Fresh copies of the entry for `id`, empty if unknown
    pub fn resolve(&self, id: &str) -> Vec<Shape> {
        self.entries.get(id).cloned().unwrap_or_default()
    }

    pub fn get(&self, id: &str) -> Option<&[Shape]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transformable;
    use crate::{Color, Point, Polygon};

    fn square(x: i32) -> Shape {
        Shape::new(Polygon::rect(Color::BLACK, Point::new(x, 0), 1, 1).unwrap())
    }

    #[test]
    fn resolve_unknown_is_empty() {
        let table = SymbolTable::new();
        assert!(table.resolve("missing").is_empty());
        assert!(!table.contains("missing"));
        assert!(table.is_empty());
    }

    #[test]
    fn register_overwrites() {
        let mut table = SymbolTable::new();
        table.register("a", &[square(0)]);
        table.register("a", &[square(5), square(6)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("a"), vec![square(5), square(6)]);
    }

    #[test]
    fn register_copies_its_input() {
        let mut table = SymbolTable::new();
        let mut shapes = vec![square(0)];
        table.register("a", &shapes);

        shapes[0].translate(Point::new(9, 9));
        assert_eq!(table.get("a"), Some(&[square(0)][..]));
    }

    #[test]
    fn resolved_copies_are_independent() {
        let mut table = SymbolTable::new();
        table.register("a", &[square(0)]);

        let mut first = table.resolve("a");
        let second = table.resolve("a");
        first[0].translate(Point::new(3, 3));

        assert_eq!(second, vec![square(0)]);
        assert_eq!(table.resolve("a"), vec![square(0)]);
    }
}
