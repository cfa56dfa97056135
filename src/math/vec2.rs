use std::ops::*;

use super::Vec2;

impl<T> Neg for Vec2<T>
where
    T: Neg<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn neg(self) -> Vec2<T> {
        Vec2::<T> {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<T> Add for Vec2<T>
where
    T: Add<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn add(self, other: Vec2<T>) -> Vec2<T> {
        Vec2::<T> {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T> Sub for Vec2<T>
where
    T: Sub<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn sub(self, other: Vec2<T>) -> Vec2<T> {
        Vec2::<T> {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T> AddAssign for Vec2<T>
where
    T: AddAssign + Copy,
{
    fn add_assign(&mut self, other: Vec2<T>) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl<T> SubAssign for Vec2<T>
where
    T: SubAssign + Copy,
{
    fn sub_assign(&mut self, other: Vec2<T>) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl<T> Mul<Vec2<T>> for Vec2<T>
where
    T: Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn mul(self, other: Vec2<T>) -> Vec2<T> {
        Vec2::<T> {
            x: self.x * other.x - self.y * other.y,
            y: self.x * other.y + self.y * other.x,
        }
    }
}

impl<T> Mul<T> for Vec2<T>
where
    T: Mul<Output = T> + Copy,
{
    type Output = Vec2<T>;

    fn mul(self, other: T) -> Vec2<T> {
        Vec2::<T> {
            x: self.x * other,
            y: self.y * other,
        }
    }
}

impl<T> Div<T> for Vec2<T>
where
    T: Div<Output = T> + Copy,
{
    type Output = Vec2<T>;

    fn div(self, other: T) -> Vec2<T> {
        Vec2::<T> {
            x: self.x / other,
            y: self.y / other,
        }
    }
}

impl<T> Vec2<T> {
    pub const fn new(x: T, y: T) -> Vec2<T> {
        Vec2::<T> { x, y }
    }
}

impl<T> Vec2<T>
where
    T: Copy + Mul<Output = T> + Add<Output = T> + Neg<Output = T>,
{
    pub fn scale(&self, a: T) -> Vec2<T> {
        Vec2::<T> {
            x: self.x * a,
            y: self.y * a,
        }
    }

    pub fn dot(&self, other: Vec2<T>) -> T {
        self.x * other.x + self.y * other.y
    }
}

impl Vec2<f32> {
    pub const fn zero() -> Vec2<f32> {
        Vec2::<f32> { x: 0.0, y: 0.0 }
    }

    pub fn mag(self) -> f32 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    pub fn distance(self, other: Vec2<f32>) -> f32 {
        (self - other).mag()
    }

    pub fn normalize(self) -> Vec2<f32> {
        let r = self.mag().recip();
        Vec2::<f32> {
            x: self.x * r,
            y: self.y * r,
        }
    }

    /// Angle from the positive x axis, in y-down screen space.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn rotate(self, angle: f32) -> Vec2<f32> {
        let (sin, cos) = angle.sin_cos();
        self * Vec2::new(cos, sin)
    }

    pub fn to_p2(self) -> Vec2<i32> {
        Vec2::<i32> {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
        }
    }
}

impl Vec2<i32> {
    pub const fn zero() -> Vec2<i32> {
        Vec2::<i32> { x: 0, y: 0 }
    }

    pub fn to_f32(self) -> Vec2<f32> {
        Vec2::<f32> {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}
