use crate::color::Color;
use crate::geometry::Point;
use crate::shape::Shape;

/// Raster target: the three primitives the scene is drawn with
pub trait Canvas {
    /// Filled ellipse with radius `(rx, ry)`
    fn draw_ellipse(&mut self, center: Point, radius: Point, fill: Color);
    fn draw_line(&mut self, from: Point, to: Point, stroke: Color);
    /// Filled closed polygon
    fn draw_polygon(&mut self, points: &[Point], fill: Color);
}

pub trait Draw {
    fn draw(&self, canvas: &mut dyn Canvas);
}

/// Draw `shapes` in order, later shapes over earlier ones
pub fn render(shapes: &[Shape], canvas: &mut dyn Canvas) {
    log::debug!("Rendering {} top-level shapes", shapes.len());
    for shape in shapes {
        shape.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Ellipse, Group, Polygon, Polyline};

    #[derive(Debug, PartialEq)]
    enum Call {
        Ellipse(Point, Point, Color),
        Line(Point, Point, Color),
        Polygon(Vec<Point>, Color),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl Canvas for Recorder {
        fn draw_ellipse(&mut self, center: Point, radius: Point, fill: Color) {
            self.0.push(Call::Ellipse(center, radius, fill));
        }

        fn draw_line(&mut self, from: Point, to: Point, stroke: Color) {
            self.0.push(Call::Line(from, to, stroke));
        }

        fn draw_polygon(&mut self, points: &[Point], fill: Color) {
            self.0.push(Call::Polygon(points.to_vec(), fill));
        }
    }

    #[test]
    fn polyline_draws_open_chain() {
        let red = Color::rgb(255, 0, 0);
        let points = vec![Point::new(0, 0), Point::new(5, 0), Point::new(5, 5)];
        let shapes = vec![Shape::new(Polyline::new(red, points).unwrap())];

        let mut canvas = Recorder::default();
        render(&shapes, &mut canvas);

        assert_eq!(
            canvas.0,
            vec![
                Call::Line(Point::new(0, 0), Point::new(5, 0), red),
                Call::Line(Point::new(5, 0), Point::new(5, 5), red),
            ]
        );
    }

    #[test]
    fn groups_draw_children_in_order() {
        let a = Shape::new(Ellipse::circle(Color::BLACK, Point::new(1, 1), 1).unwrap());
        let b = Shape::new(Polygon::rect(Color::WHITE, Point::ORIGIN, 2, 2).unwrap());
        let c = Shape::new(Polyline::line(Color::BLACK, Point::ORIGIN, Point::new(3, 3)));
        let shapes = vec![Shape::new(Group::new(vec![a, Shape::new(Group::new(vec![b]))])), c];

        let mut canvas = Recorder::default();
        render(&shapes, &mut canvas);

        assert_eq!(canvas.0.len(), 3);
        assert!(matches!(canvas.0[0], Call::Ellipse(..)));
        assert!(matches!(canvas.0[1], Call::Polygon(..)));
        assert!(matches!(canvas.0[2], Call::Line(..)));
    }
}
