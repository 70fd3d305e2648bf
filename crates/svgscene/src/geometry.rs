use std::fmt;
use std::str::FromStr;

/// Location in 2D integer pixel coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn translate(self, t: Point) -> Point {
        Point {
            x: self.x.saturating_add(t.x),
            y: self.y.saturating_add(t.y),
        }
    }

    /// Rotate by `degrees` around `origin`.
    ///
    /// The angle is used as given (negative or beyond a full turn is fine).
    /// Each component is rounded to the nearest integer, ties away from zero.
    pub fn rotate(self, origin: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = f64::from(self.x) - f64::from(origin.x);
        let dy = f64::from(self.y) - f64::from(origin.y);

        let x = (dx * cos - dy * sin).round() + f64::from(origin.x);
        let y = (dx * sin + dy * cos).round() + f64::from(origin.y);

        // `as` saturates on out-of-range floats
        Point {
            x: x as i32,
            y: y as i32,
        }
    }

    pub fn scale(self, origin: Point, factor: i32) -> Point {
        let dx = self.x.saturating_sub(origin.x).saturating_mul(factor);
        let dy = self.y.saturating_sub(origin.y).saturating_mul(factor);
        Point {
            x: origin.x.saturating_add(dx),
            y: origin.y.saturating_add(dy),
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parses `"x y"` or `"x,y"`; both coordinates are required
impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut numbers = tokens(s).map(parse_number);
        match (numbers.next(), numbers.next(), numbers.next()) {
            (Some(Some(x)), Some(Some(y)), None) => Ok(Point { x, y }),
            _ => Err(format!("Invalid point: {:?}", s)),
        }
    }
}

/// Split on whitespace and commas, dropping empty tokens
pub(crate) fn tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

/// Parse an integer coordinate; decimals round to the nearest integer
pub(crate) fn parse_number(s: &str) -> Option<i32> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i32>() {
        return Some(n);
    }
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.round() as i32)
}

/// Parse a point list such as `"0,0 10,5 20,0"`.
///
/// Pairs are read left to right; parsing stops at the first token that is not
/// a number and a trailing unpaired number is dropped.
pub fn parse_points(s: &str) -> Vec<Point> {
    let numbers: Vec<i32> = tokens(s).map_while(parse_number).collect();
    numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}
