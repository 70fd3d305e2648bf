use crate::color::Color;
use crate::geometry::Point;
use crate::render::{Canvas, Draw};
use crate::transform::Transformable;
use crate::{Result, SvgError};

/// A scene element: optional identifier plus its geometry
///
/// `Clone` is a deep copy; a cloned group owns fresh copies of all its
/// descendants.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: Option<String>,
    pub kind: ShapeKind,
}

/// Closed set of drawable variants
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Ellipse(Ellipse),
    Polyline(Polyline),
    Polygon(Polygon),
    Group(Group),
}

/// Filled axis-aligned ellipse; circles are ellipses with equal radii
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub fill: Color,
    pub center: Point,
    /// (rx, ry)
    pub radius: Point,
}

/// Open chain of line segments between consecutive points
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub stroke: Color,
    pub points: Vec<Point>,
}

/// Closed filled region
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub fill: Color,
    pub points: Vec<Point>,
}

/// Ordered composite of exclusively owned children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub children: Vec<Shape>,
}

impl Ellipse {
    pub fn new(fill: Color, center: Point, radius: Point) -> Result<Self> {
        if radius.x < 0 || radius.y < 0 {
            return Err(SvgError::InvalidShape {
                element: "ellipse",
                reason: format!("negative radius {}", radius),
            });
        }
        Ok(Self {
            fill,
            center,
            radius,
        })
    }

    pub fn circle(fill: Color, center: Point, radius: i32) -> Result<Self> {
        Self::new(fill, center, Point::new(radius, radius)).map_err(|_| {
            SvgError::InvalidShape {
                element: "circle",
                reason: format!("negative radius {}", radius),
            }
        })
    }

    pub fn is_circle(&self) -> bool {
        self.radius.x == self.radius.y
    }
}

impl Polyline {
    pub fn new(stroke: Color, points: Vec<Point>) -> Result<Self> {
        if points.len() < 2 {
            return Err(SvgError::InvalidShape {
                element: "polyline",
                reason: format!("needs at least 2 points, got {}", points.len()),
            });
        }
        Ok(Self { stroke, points })
    }

    pub fn line(stroke: Color, start: Point, end: Point) -> Self {
        Self {
            stroke,
            points: vec![start, end],
        }
    }

    /// Consecutive point pairs, in order
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

impl Polygon {
    pub fn new(fill: Color, points: Vec<Point>) -> Result<Self> {
        if points.len() < 3 {
            return Err(SvgError::InvalidShape {
                element: "polygon",
                reason: format!("needs at least 3 points, got {}", points.len()),
            });
        }
        Ok(Self { fill, points })
    }

    /// Axis-aligned rectangle as a 4-point polygon
    ///
    /// Corners run clockwise on screen from `corner`. After construction the
    /// result is an ordinary polygon and may be rotated or scaled freely.
    pub fn rect(fill: Color, corner: Point, width: i32, height: i32) -> Result<Self> {
        if width < 0 || height < 0 {
            return Err(SvgError::InvalidShape {
                element: "rect",
                reason: format!("negative size {}x{}", width, height),
            });
        }
        let Point { x, y } = corner;
        let right = x.saturating_add(width);
        let bottom = y.saturating_add(height);
        Ok(Self {
            fill,
            points: vec![
                Point::new(x, y),
                Point::new(right, y),
                Point::new(right, bottom),
                Point::new(x, bottom),
            ],
        })
    }
}

impl Group {
    pub fn new(children: Vec<Shape>) -> Self {
        Self { children }
    }
}

impl Shape {
    pub fn new(kind: impl Into<ShapeKind>) -> Self {
        Self {
            id: None,
            kind: kind.into(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn as_ellipse(&self) -> Option<&Ellipse> {
        match &self.kind {
            ShapeKind::Ellipse(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_polyline(&self) -> Option<&Polyline> {
        match &self.kind {
            ShapeKind::Polyline(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match &self.kind {
            ShapeKind::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.kind {
            ShapeKind::Group(g) => Some(g),
            _ => None,
        }
    }
}

impl From<Ellipse> for ShapeKind {
    fn from(e: Ellipse) -> Self {
        ShapeKind::Ellipse(e)
    }
}

impl From<Polyline> for ShapeKind {
    fn from(p: Polyline) -> Self {
        ShapeKind::Polyline(p)
    }
}

impl From<Polygon> for ShapeKind {
    fn from(p: Polygon) -> Self {
        ShapeKind::Polygon(p)
    }
}

impl From<Group> for ShapeKind {
    fn from(g: Group) -> Self {
        ShapeKind::Group(g)
    }
}

impl Transformable for Ellipse {
    fn translate(&mut self, t: Point) {
        self.center = self.center.translate(t);
    }

    // Radii stay axis-aligned; a quarter turn swaps them
    fn rotate(&mut self, origin: Point, degrees: f64) {
        self.center = self.center.rotate(origin, degrees);
        if degrees.rem_euclid(180.0) == 90.0 {
            self.radius = Point::new(self.radius.y, self.radius.x);
        }
    }

    // Radius is a size: it scales by the factor directly, sign included
    fn scale(&mut self, origin: Point, factor: i32) {
        self.center = self.center.scale(origin, factor);
        self.radius = Point::new(
            self.radius.x.saturating_mul(factor),
            self.radius.y.saturating_mul(factor),
        );
    }
}

impl Transformable for Polyline {
    fn translate(&mut self, t: Point) {
        self.points.translate(t);
    }

    fn rotate(&mut self, origin: Point, degrees: f64) {
        self.points.rotate(origin, degrees);
    }

    fn scale(&mut self, origin: Point, factor: i32) {
        self.points.scale(origin, factor);
    }
}

impl Transformable for Polygon {
    fn translate(&mut self, t: Point) {
        self.points.translate(t);
    }

    fn rotate(&mut self, origin: Point, degrees: f64) {
        self.points.rotate(origin, degrees);
    }

    fn scale(&mut self, origin: Point, factor: i32) {
        self.points.scale(origin, factor);
    }
}

impl Transformable for Group {
    fn translate(&mut self, t: Point) {
        self.children.translate(t);
    }

    fn rotate(&mut self, origin: Point, degrees: f64) {
        self.children.rotate(origin, degrees);
    }

    fn scale(&mut self, origin: Point, factor: i32) {
        self.children.scale(origin, factor);
    }
}

impl Transformable for ShapeKind {
    fn translate(&mut self, t: Point) {
        match self {
            ShapeKind::Ellipse(e) => e.translate(t),
            ShapeKind::Polyline(p) => p.translate(t),
            ShapeKind::Polygon(p) => p.translate(t),
            ShapeKind::Group(g) => g.translate(t),
        }
    }

    fn rotate(&mut self, origin: Point, degrees: f64) {
        match self {
            ShapeKind::Ellipse(e) => e.rotate(origin, degrees),
            ShapeKind::Polyline(p) => p.rotate(origin, degrees),
            ShapeKind::Polygon(p) => p.rotate(origin, degrees),
            ShapeKind::Group(g) => g.rotate(origin, degrees),
        }
    }

    fn scale(&mut self, origin: Point, factor: i32) {
        match self {
            ShapeKind::Ellipse(e) => e.scale(origin, factor),
            ShapeKind::Polyline(p) => p.scale(origin, factor),
            ShapeKind::Polygon(p) => p.scale(origin, factor),
            ShapeKind::Group(g) => g.scale(origin, factor),
        }
    }
}

impl Transformable for Shape {
    fn translate(&mut self, t: Point) {
        self.kind.translate(t);
    }

    fn rotate(&mut self, origin: Point, degrees: f64) {
        self.kind.rotate(origin, degrees);
    }

    fn scale(&mut self, origin: Point, factor: i32) {
        self.kind.scale(origin, factor);
    }
}

impl Draw for Ellipse {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_ellipse(self.center, self.radius, self.fill);
    }
}

impl Draw for Polyline {
    fn draw(&self, canvas: &mut dyn Canvas) {
        for (from, to) in self.segments() {
            canvas.draw_line(from, to, self.stroke);
        }
    }
}

impl Draw for Polygon {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_polygon(&self.points, self.fill);
    }
}

impl Draw for Group {
    fn draw(&self, canvas: &mut dyn Canvas) {
        for child in &self.children {
            child.draw(canvas);
        }
    }
}

impl Draw for Shape {
    fn draw(&self, canvas: &mut dyn Canvas) {
        match &self.kind {
            ShapeKind::Ellipse(e) => e.draw(canvas),
            ShapeKind::Polyline(p) => p.draw(canvas),
            ShapeKind::Polygon(p) => p.draw(canvas),
            ShapeKind::Group(g) => g.draw(canvas),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Shape {
        Shape::new(Polygon::rect(Color::BLACK, Point::new(x, y), w, h).unwrap())
    }

    fn polygon_points(shape: &Shape) -> &[Point] {
        &shape.as_polygon().expect("polygon").points
    }

    #[test]
    fn circle_has_equal_radii() {
        let c = Ellipse::circle(Color::WHITE, Point::new(5, 5), 3).unwrap();
        assert_eq!(c.radius, Point::new(3, 3));
        assert!(c.is_circle());
    }

    #[test]
    fn negative_sizes_are_rejected() {
        assert!(Ellipse::new(Color::BLACK, Point::ORIGIN, Point::new(-1, 2)).is_err());
        assert!(Ellipse::circle(Color::BLACK, Point::ORIGIN, -3).is_err());
        assert!(Polygon::rect(Color::BLACK, Point::ORIGIN, 4, -1).is_err());
    }

    #[test]
    fn point_counts_are_enforced() {
        assert!(Polyline::new(Color::BLACK, vec![Point::ORIGIN]).is_err());
        assert!(Polyline::new(Color::BLACK, vec![Point::ORIGIN, Point::new(1, 1)]).is_ok());
        assert!(Polygon::new(Color::BLACK, vec![Point::ORIGIN, Point::new(1, 1)]).is_err());
    }

    #[test]
    fn rect_corners() {
        let r = rect(1, 2, 4, 3);
        assert_eq!(
            polygon_points(&r),
            &[
                Point::new(1, 2),
                Point::new(5, 2),
                Point::new(5, 5),
                Point::new(1, 5)
            ]
        );
    }

    #[test]
    fn rect_rotates_into_general_polygon() {
        let mut r = rect(0, 0, 4, 2);
        r.rotate(Point::ORIGIN, 45.0);
        let points = polygon_points(&r);
        // (4, 0) by 45 degrees is (2.83, 2.83)
        assert_eq!(points[1], Point::new(3, 3));
        // (4, 2) by 45 degrees is (1.41, 4.24)
        assert_eq!(points[2], Point::new(1, 4));
    }

    #[test]
    fn rotate_full_turn_is_identity() {
        let pivot = Point::new(3, -2);
        let shapes = vec![
            rect(1, 2, 10, 7),
            Shape::new(Ellipse::new(Color::BLACK, Point::new(9, 4), Point::new(2, 5)).unwrap()),
            Shape::new(Polyline::line(Color::BLACK, Point::new(-5, 5), Point::new(8, 1))),
            Shape::new(Group::new(vec![rect(0, 0, 3, 3), rect(-4, 6, 1, 2)])),
        ];
        for shape in shapes {
            let mut rotated = shape.clone();
            rotated.rotate(pivot, 360.0);
            assert_eq!(rotated, shape);
        }
    }

    #[test]
    fn scale_one_is_identity() {
        let shape = Shape::new(Group::new(vec![
            rect(1, 2, 10, 7),
            Shape::new(Ellipse::new(Color::BLACK, Point::new(9, 4), Point::new(2, 5)).unwrap()),
        ]));
        let mut scaled = shape.clone();
        scaled.scale(Point::new(7, 7), 1);
        assert_eq!(scaled, shape);
    }

    #[test]
    fn ellipse_radius_scales_as_size() {
        let mut e = Ellipse::new(Color::BLACK, Point::new(2, 3), Point::new(4, 1)).unwrap();
        e.scale(Point::ORIGIN, 2);
        assert_eq!(e.center, Point::new(4, 6));
        assert_eq!(e.radius, Point::new(8, 2));

        e.scale(Point::ORIGIN, -1);
        assert_eq!(e.center, Point::new(-4, -6));
        assert_eq!(e.radius, Point::new(-8, -2));
    }

    #[test]
    fn ellipse_quarter_turn_swaps_radii() {
        let mut e = Ellipse::new(Color::BLACK, Point::new(5, 0), Point::new(4, 1)).unwrap();
        e.rotate(Point::ORIGIN, 90.0);
        assert_eq!(e.center, Point::new(0, 5));
        assert_eq!(e.radius, Point::new(1, 4));

        e.rotate(Point::ORIGIN, -270.0);
        assert_eq!(e.radius, Point::new(4, 1));
    }

    #[test]
    fn ellipse_other_rotations_keep_radii() {
        let mut e = Ellipse::new(Color::BLACK, Point::new(5, 0), Point::new(4, 1)).unwrap();
        e.rotate(Point::ORIGIN, 180.0);
        assert_eq!(e.center, Point::new(-5, 0));
        assert_eq!(e.radius, Point::new(4, 1));

        e.rotate(Point::ORIGIN, 45.0);
        assert_eq!(e.radius, Point::new(4, 1));
    }

    #[test]
    fn group_transforms_every_child() {
        let mut g = Shape::new(Group::new(vec![rect(0, 0, 1, 1), rect(5, 5, 1, 1)]));
        g.translate(Point::new(10, 20));
        let group = g.as_group().unwrap();
        assert_eq!(polygon_points(&group.children[0])[0], Point::new(10, 20));
        assert_eq!(polygon_points(&group.children[1])[0], Point::new(15, 25));
    }

    #[test]
    fn group_copy_is_deep() {
        let nested = Shape::new(Group::new(vec![rect(1, 1, 2, 2)]));
        let original = Shape::new(Group::new(vec![rect(0, 0, 4, 4), nested]));

        let mut copy = original.clone();
        copy.translate(Point::new(100, 100));

        let children = &original.as_group().unwrap().children;
        assert_eq!(polygon_points(&children[0])[0], Point::new(0, 0));
        let inner = &children[1].as_group().unwrap().children[0];
        assert_eq!(polygon_points(inner)[0], Point::new(1, 1));

        let copied = &copy.as_group().unwrap().children;
        assert_eq!(polygon_points(&copied[0])[0], Point::new(100, 100));
    }
}
