use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, Sum};

/// A measurement in points, where 72 points make up 1 inch. This is the native
/// unit of PDF user space and the unit all page geometry in this crate is
/// expressed in.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, AddAssign, Deref, DerefMut, Display,
    From, Into, Sum,
)]
pub struct Pt(pub f32);

/// A measurement in inches
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, AddAssign, Deref, DerefMut, Display,
    From, Into,
)]
pub struct In(pub f32);

/// A measurement in millimetres
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, AddAssign, Deref, DerefMut, Display,
    From, Into,
)]
pub struct Mm(pub f32);

impl std::ops::Sub for Pt {
    type Output = Pt;
    fn sub(self, rhs: Pt) -> Pt {
        Pt(self.0 - rhs.0)
    }
}

impl std::ops::SubAssign for Pt {
    fn sub_assign(&mut self, rhs: Pt) {
        self.0 -= rhs.0;
    }
}

impl std::ops::Mul<f32> for Pt {
    type Output = Pt;
    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl std::ops::Div<f32> for Pt {
    type Output = Pt;
    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl From<In> for Pt {
    fn from(v: In) -> Pt {
        Pt(v.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(v: Mm) -> Pt {
        Pt(v.0 * 72.0 / 25.4)
    }
}

impl From<In> for Mm {
    fn from(v: In) -> Mm {
        Mm(v.0 * 25.4)
    }
}

impl From<Mm> for In {
    fn from(v: Mm) -> In {
        In(v.0 / 25.4)
    }
}
