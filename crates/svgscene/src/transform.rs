use std::str::FromStr;

use crate::SvgError;
use crate::geometry::{Point, parse_number};

/// In-place affine operations shared by every scene element
pub trait Transformable {
    fn translate(&mut self, t: Point);
    /// Rotate by `degrees` (clockwise on screen, since y grows downwards)
    fn rotate(&mut self, origin: Point, degrees: f64);
    fn scale(&mut self, origin: Point, factor: i32);
}

impl Transformable for Point {
    fn translate(&mut self, t: Point) {
        *self = Point::translate(*self, t);
    }

    fn rotate(&mut self, origin: Point, degrees: f64) {
        *self = Point::rotate(*self, origin, degrees);
    }

    fn scale(&mut self, origin: Point, factor: i32) {
        *self = Point::scale(*self, origin, factor);
    }
}

impl<T: Transformable> Transformable for [T] {
    fn translate(&mut self, t: Point) {
        self.iter_mut().for_each(|item| item.translate(t));
    }

    fn rotate(&mut self, origin: Point, degrees: f64) {
        self.iter_mut().for_each(|item| item.rotate(origin, degrees));
    }

    fn scale(&mut self, origin: Point, factor: i32) {
        self.iter_mut().for_each(|item| item.scale(origin, factor));
    }
}

/// A single transform function from a `transform` attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// `translate(x y)`, `translate(x, y)` or `translate(x)`
    Translate(Point),
    /// `scale(n)`, integer factor
    Scale(i32),
    /// `rotate(n)`, degrees
    Rotate(f64),
}

impl Transform {
    /// Apply to `target`, pivoting rotate/scale on `origin`
    pub fn apply<T: Transformable + ?Sized>(&self, target: &mut T, origin: Point) {
        match *self {
            Transform::Translate(t) => target.translate(t),
            Transform::Scale(factor) => target.scale(origin, factor),
            Transform::Rotate(degrees) => target.rotate(origin, degrees),
        }
    }

    fn from_call(name: &str, args: &[&str]) -> Result<Self, SvgError> {
        let invalid = || SvgError::InvalidTransform(format!("{}({})", name, args.join(" ")));

        match (name, args) {
            ("translate", [x]) => {
                let x = parse_number(x).ok_or_else(invalid)?;
                Ok(Transform::Translate(Point::new(x, 0)))
            }
            ("translate", [x, y]) => {
                let x = parse_number(x).ok_or_else(invalid)?;
                let y = parse_number(y).ok_or_else(invalid)?;
                Ok(Transform::Translate(Point::new(x, y)))
            }
            ("scale", [n]) => n.parse().map(Transform::Scale).map_err(|_| invalid()),
            ("rotate", [n]) => n
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite())
                .map(Transform::Rotate)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for Transform {
    type Err = SvgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let list: TransformList = s.parse()?;
        match list.0.as_slice() {
            [single] => Ok(*single),
            _ => Err(SvgError::InvalidTransform(s.to_string())),
        }
    }
}

/// The full content of a `transform` attribute.
///
/// As in SVG, the list composes right to left: the last function written is
/// applied first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformList(pub Vec<Transform>);

impl TransformList {
    pub fn apply<T: Transformable + ?Sized>(&self, target: &mut T, origin: Point) {
        for transform in self.0.iter().rev() {
            transform.apply(target, origin);
        }
    }
}

impl FromStr for TransformList {
    type Err = SvgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut transforms = Vec::new();
        let mut rest = s.trim_start();

        while !rest.is_empty() {
            let open = rest
                .find('(')
                .ok_or_else(|| SvgError::InvalidTransform(s.to_string()))?;
            let close = rest[open..]
                .find(')')
                .map(|i| open + i)
                .ok_or_else(|| SvgError::InvalidTransform(s.to_string()))?;

            let name = rest[..open].trim();
            let args: Vec<&str> = crate::geometry::tokens(&rest[open + 1..close]).collect();
            transforms.push(Transform::from_call(name, &args)?);

            // Separators between functions may be whitespace or commas
            rest = rest[close + 1..].trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        }

        if transforms.is_empty() {
            return Err(SvgError::InvalidTransform(s.to_string()));
        }
        Ok(TransformList(transforms))
    }
}
