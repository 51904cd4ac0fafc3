//! Turtle graphics: the capability trait, a real implementation, a mock,
//! and the painter that drives them.

use crate::mock::MockRecorder;

pub trait Turtle {
    fn pen_up(&mut self);
    fn pen_down(&mut self);
    fn forward(&mut self, distance: i32);
    fn turn(&mut self, degrees: i32);
    fn go_to(&mut self, x: i32, y: i32);
    fn x(&self) -> i32;
    fn y(&self) -> i32;
}

/// Tracks position and heading, and keeps the segments drawn with the pen down.
#[derive(Debug, Default, Clone)]
pub struct CanvasTurtle {
    x: i32,
    y: i32,
    heading: i32,
    pen_down: bool,
    pub segments: Vec<((i32, i32), (i32, i32))>,
}

impl CanvasTurtle {
    fn move_to(&mut self, x: i32, y: i32) {
        if self.pen_down {
            self.segments.push(((self.x, self.y), (x, y)));
        }
        self.x = x;
        self.y = y;
    }
}

impl Turtle for CanvasTurtle {
    fn pen_up(&mut self) {
        self.pen_down = false;
    }

    fn pen_down(&mut self) {
        self.pen_down = true;
    }

    fn forward(&mut self, distance: i32) {
        let (dx, dy) = match self.heading.rem_euclid(360) {
            0 => (distance, 0),
            90 => (0, distance),
            180 => (-distance, 0),
            270 => (0, -distance),
            other => {
                let rad = (other as f64).to_radians();
                (
                    (distance as f64 * rad.cos()).round() as i32,
                    (distance as f64 * rad.sin()).round() as i32,
                )
            }
        };
        self.move_to(self.x + dx, self.y + dy);
    }

    fn turn(&mut self, degrees: i32) {
        self.heading = (self.heading + degrees).rem_euclid(360);
    }

    fn go_to(&mut self, x: i32, y: i32) {
        self.move_to(x, y);
    }

    fn x(&self) -> i32 {
        self.x
    }

    fn y(&self) -> i32 {
        self.y
    }
}

/// Records every turtle call; position getters return configured defaults.
#[derive(Debug)]
pub struct MockTurtle {
    pub calls: MockRecorder,
}

impl Default for MockTurtle {
    fn default() -> Self {
        Self {
            calls: MockRecorder::new("turtle"),
        }
    }
}

impl Turtle for MockTurtle {
    fn pen_up(&mut self) {
        self.calls.record("pen_up", &[]);
    }

    fn pen_down(&mut self) {
        self.calls.record("pen_down", &[]);
    }

    fn forward(&mut self, distance: i32) {
        self.calls.record("forward", &[&distance]);
    }

    fn turn(&mut self, degrees: i32) {
        self.calls.record("turn", &[&degrees]);
    }

    fn go_to(&mut self, x: i32, y: i32) {
        self.calls.record("go_to", &[&x, &y]);
    }

    fn x(&self) -> i32 {
        self.calls.record("x", &[]);
        self.calls.returns_or("x", 0)
    }

    fn y(&self) -> i32 {
        self.calls.record("y", &[]);
        self.calls.returns_or("y", 0)
    }
}

pub struct Painter<'a> {
    turtle: &'a mut dyn Turtle,
}

impl<'a> Painter<'a> {
    pub fn new(turtle: &'a mut dyn Turtle) -> Self {
        Self { turtle }
    }

    /// Approximates a circle as a 36-sided polygon.
    pub fn draw_circle(&mut self, x: i32, y: i32, radius: i32) -> bool {
        if radius < 0 {
            return false;
        }
        self.turtle.pen_up();
        self.turtle.go_to(x + radius, y);
        self.turtle.turn(90);
        self.turtle.pen_down();
        let side = ((2.0 * std::f64::consts::PI * radius as f64) / 36.0).round() as i32;
        for _ in 0..36 {
            self.turtle.forward(side);
            self.turtle.turn(10);
        }
        self.turtle.pen_up();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Times;

    #[test]
    fn painter_puts_the_pen_down() {
        let mut turtle = MockTurtle::default();
        turtle.calls.expect_call("pen_down").times(Times::AtLeast(1));
        assert!(Painter::new(&mut turtle).draw_circle(0, 0, 10));
        assert!(turtle.calls.verify().is_ok());
    }

    #[test]
    fn canvas_draws_only_with_pen_down() {
        let mut turtle = CanvasTurtle::default();
        turtle.forward(10);
        turtle.pen_down();
        turtle.turn(90);
        turtle.forward(5);
        assert_eq!((turtle.x(), turtle.y()), (10, 5));
        assert_eq!(turtle.segments, vec![((10, 0), (10, 5))]);
    }

    #[test]
    fn negative_radius_draws_nothing() {
        let mut turtle = MockTurtle::default();
        assert!(!Painter::new(&mut turtle).draw_circle(0, 0, -1));
        assert!(turtle.calls.calls().is_empty());
    }
}
