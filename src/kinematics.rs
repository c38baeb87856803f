//! Point-mass integration under gravity and drag.

/// Position in world space. y grows towards the ground.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
}

impl Coordinate {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// World units per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Advance one step of `dt` seconds.
///
/// Drag scales the previous velocity by `1 - drag * dt`, gravity is added on
/// top, and the position moves with the mean of the old and new velocities.
/// The drag term is a per-step decay rather than an exact exponential, so the
/// trajectory depends on the step size.
pub fn integrate(
    velocity: Velocity,
    position: Coordinate,
    dt: f32,
    gravity: f32,
    drag: f32,
) -> (Velocity, Coordinate) {
    let decay = 1.0 - drag * dt;
    let next = Velocity {
        x: velocity.x * decay,
        y: velocity.y * decay + gravity * dt,
    };
    let mean_x = (velocity.x + next.x) / 2.0;
    let mean_y = (velocity.y + next.y) / 2.0;

    (
        next,
        Coordinate {
            x: position.x + mean_x * dt,
            y: position.y + mean_y * dt,
        },
    )
}
