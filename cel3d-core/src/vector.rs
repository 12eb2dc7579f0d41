/// Fixed-size N-dimensional vector used for positions, normals, colours and lights
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use nalgebra::{Point3, Vector3};

use crate::error::{GeometryError, GeometryResult};

/// Number of leading components `VectorN::new` will consume.
const MAX_INIT_COMPONENTS: usize = 4;

/// Numeric component type of a `VectorN`
pub trait Scalar:
    Copy
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    const ZERO: Self;

    fn sqrt(self) -> Self;
}

macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                const ZERO: Self = 0.0;

                #[inline]
                fn sqrt(self) -> Self {
                    <$t>::sqrt(self)
                }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);

impl Scalar for i32 {
    const ZERO: Self = 0;

    /// Truncating square root, computed in double precision.
    #[inline]
    fn sqrt(self) -> Self {
        (self as f64).sqrt() as i32
    }
}

/// A vector of `N` components of type `T`, stored inline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorN<T, const N: usize> {
    data: [T; N],
}

pub type Vector2f = VectorN<f32, 2>;
pub type Vector2d = VectorN<f64, 2>;
pub type Vector2i = VectorN<i32, 2>;
pub type Vector3f = VectorN<f32, 3>;
pub type Vector3d = VectorN<f64, 3>;
pub type Vector3i = VectorN<i32, 3>;
pub type Vector4f = VectorN<f32, 4>;
pub type Vector4d = VectorN<f64, 4>;
pub type Vector4i = VectorN<i32, 4>;

impl<T: Scalar, const N: usize> VectorN<T, N> {
    /// The zero vector
    pub fn zero() -> Self {
        Self { data: [T::ZERO; N] }
    }

    /// Build a vector from up to four leading values.
    ///
    /// Components without a matching value are zero; values past `N`
    /// (or past the fourth) are ignored.
    pub fn new(values: &[T]) -> Self {
        let mut vector = Self::zero();
        for (slot, value) in vector
            .data
            .iter_mut()
            .zip(values.iter().take(MAX_INIT_COMPONENTS))
        {
            *slot = *value;
        }
        vector
    }

    pub fn from_array(data: [T; N]) -> Self {
        Self { data }
    }

    /// Copy the first `N` values of a slice, failing if it is too short
    pub fn try_from_slice(values: &[T]) -> GeometryResult<Self> {
        let mut vector = Self::zero();
        vector.copy_from(values)?;
        Ok(vector)
    }

    pub fn get(&self, index: usize) -> GeometryResult<T> {
        self.data
            .get(index)
            .copied()
            .ok_or(GeometryError::OutOfRange { index, len: N })
    }

    pub fn set(&mut self, index: usize, value: T) -> GeometryResult<()> {
        let slot = self
            .data
            .get_mut(index)
            .ok_or(GeometryError::OutOfRange { index, len: N })?;
        *slot = value;
        Ok(())
    }

    pub fn copy_from(&mut self, values: &[T]) -> GeometryResult<()> {
        if values.len() < N {
            return Err(GeometryError::InvalidArgument(format!(
                "source holds {} values, need {}",
                values.len(),
                N
            )));
        }
        self.data.copy_from_slice(&values[..N]);
        Ok(())
    }

    pub fn copy_to(&self, out: &mut [T]) -> GeometryResult<()> {
        if out.len() < N {
            return Err(GeometryError::InvalidArgument(format!(
                "destination holds {} values, need {}",
                out.len(),
                N
            )));
        }
        out[..N].copy_from_slice(&self.data);
        Ok(())
    }

    pub fn as_array(&self) -> &[T; N] {
        &self.data
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn set_zero(&mut self) {
        self.data = [T::ZERO; N];
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|v| *v == T::ZERO)
    }

    pub fn length(&self) -> T {
        self.length_sq().sqrt()
    }

    pub fn length_sq(&self) -> T {
        self.dot(self)
    }

    /// Rescale this vector to the given length, keeping its direction
    pub fn set_length(&mut self, length: T) -> GeometryResult<()> {
        self.unitize()?;
        *self *= length;
        Ok(())
    }

    /// Normalize in place. A zero-length vector is left untouched.
    pub fn unitize(&mut self) -> GeometryResult<()> {
        let len = self.length();
        if len == T::ZERO {
            return Err(GeometryError::DivideByZero);
        }
        *self /= len;
        Ok(())
    }

    pub fn distance_to(&self, other: &Self) -> T {
        (*other - *self).length()
    }

    pub fn distance_to_sq(&self, other: &Self) -> T {
        (*other - *self).length_sq()
    }

    pub fn dot(&self, other: &Self) -> T {
        let mut sum = T::ZERO;
        for i in 0..N {
            sum += self.data[i] * other.data[i];
        }
        sum
    }

    fn map(mut self, f: impl Fn(T) -> T) -> Self {
        for v in &mut self.data {
            *v = f(*v);
        }
        self
    }

    fn zip_with(mut self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        for (a, b) in self.data.iter_mut().zip(rhs.data) {
            *a = f(*a, b);
        }
        self
    }
}

impl<T: Scalar> VectorN<T, 2> {
    pub fn x(&self) -> T {
        self.data[0]
    }

    pub fn y(&self) -> T {
        self.data[1]
    }

    /// Perpendicular vector: (x, y) -> (-y, x)
    pub fn perp(&self) -> Self {
        Self::from_array([-self.data[1], self.data[0]])
    }
}

impl<T: Scalar> VectorN<T, 3> {
    pub fn x(&self) -> T {
        self.data[0]
    }

    pub fn y(&self) -> T {
        self.data[1]
    }

    pub fn z(&self) -> T {
        self.data[2]
    }

    pub fn cross(&self, other: &Self) -> Self {
        let [a0, a1, a2] = self.data;
        let [b0, b1, b2] = other.data;
        Self::from_array([a1 * b2 - a2 * b1, a2 * b0 - a0 * b2, a0 * b1 - a1 * b0])
    }
}

impl<T: Scalar> VectorN<T, 4> {
    pub fn x(&self) -> T {
        self.data[0]
    }

    pub fn y(&self) -> T {
        self.data[1]
    }

    pub fn z(&self) -> T {
        self.data[2]
    }

    pub fn w(&self) -> T {
        self.data[3]
    }

    /// Drop the fourth component
    pub fn xyz(&self) -> VectorN<T, 3> {
        VectorN::from_array([self.data[0], self.data[1], self.data[2]])
    }
}

impl<T: Scalar, const N: usize> Default for VectorN<T, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Scalar, const N: usize> From<[T; N]> for VectorN<T, N> {
    fn from(data: [T; N]) -> Self {
        Self::from_array(data)
    }
}

impl<T: Scalar, const N: usize> fmt::Display for VectorN<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

impl<T: Scalar, const N: usize> Index<usize> for VectorN<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        assert!(index < N, "vector index {} out of range for length {}", index, N);
        &self.data[index]
    }
}

impl<T: Scalar, const N: usize> IndexMut<usize> for VectorN<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        assert!(index < N, "vector index {} out of range for length {}", index, N);
        &mut self.data[index]
    }
}

impl<T: Scalar, const N: usize> Add for VectorN<T, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<T: Scalar, const N: usize> AddAssign for VectorN<T, N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar, const N: usize> Sub for VectorN<T, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl<T: Scalar, const N: usize> SubAssign for VectorN<T, N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar, const N: usize> Neg for VectorN<T, N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

impl<T: Scalar, const N: usize> Mul<T> for VectorN<T, N> {
    type Output = Self;

    fn mul(self, scalar: T) -> Self {
        self.map(|v| v * scalar)
    }
}

impl<T: Scalar, const N: usize> MulAssign<T> for VectorN<T, N> {
    fn mul_assign(&mut self, scalar: T) {
        *self = *self * scalar;
    }
}

// No zero guard: division follows the scalar type's own rules.
impl<T: Scalar, const N: usize> Div<T> for VectorN<T, N> {
    type Output = Self;

    fn div(self, scalar: T) -> Self {
        self.map(|v| v / scalar)
    }
}

impl<T: Scalar, const N: usize> DivAssign<T> for VectorN<T, N> {
    fn div_assign(&mut self, scalar: T) {
        *self = *self / scalar;
    }
}

impl From<Vector3f> for Vector3<f32> {
    fn from(v: Vector3f) -> Self {
        Vector3::new(v.x(), v.y(), v.z())
    }
}

impl From<Vector3f> for Point3<f32> {
    fn from(v: Vector3f) -> Self {
        Point3::new(v.x(), v.y(), v.z())
    }
}

impl From<Vector3<f32>> for Vector3f {
    fn from(v: Vector3<f32>) -> Self {
        Self::from_array([v.x, v.y, v.z])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let v = Vector4d::default();
        assert!(v.is_zero());
        assert_eq!(v, Vector4d::zero());
        assert_eq!(v.length(), 0.0);
    }

    #[test]
    fn test_set_zero() {
        let mut v = Vector3i::new(&[4, -2, 7]);
        assert!(!v.is_zero());
        v.set_zero();
        assert!(v.is_zero());
        assert_eq!(v, Vector3i::zero());
    }

    #[test]
    fn test_new_pads_with_zero() {
        let v = Vector3f::new(&[1.0]);
        assert_eq!(v.as_array(), &[1.0, 0.0, 0.0]);

        let v = Vector2i::new(&[1, 2, 3, 4]);
        assert_eq!(v.as_array(), &[1, 2]);

        // Only four leading values are ever consumed
        let v = VectorN::<i32, 6>::new(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(v.as_array(), &[1, 2, 3, 4, 0, 0]);
    }

    #[test]
    fn test_try_from_slice_rejects_short_source() {
        assert!(Vector3f::try_from_slice(&[1.0, 2.0, 3.0, 4.0]).is_ok());
        assert!(matches!(
            Vector3f::try_from_slice(&[1.0, 2.0]),
            Err(GeometryError::InvalidArgument(_))
        ));
        assert!(Vector3f::try_from_slice(&[]).is_err());
    }

    #[test]
    fn test_copy_to() {
        let v = Vector4f::new(&[10.0, 5.0, 0.0, 1.0]);
        let mut out = [0.0f32; 4];
        v.copy_to(&mut out).unwrap();
        assert_eq!(out, [10.0, 5.0, 0.0, 1.0]);

        let mut short = [0.0f32; 3];
        assert!(v.copy_to(&mut short).is_err());
    }

    #[test]
    fn test_get_set_bounds() {
        let mut v = Vector3i::zero();
        v.set(2, 7).unwrap();
        assert_eq!(v.get(2).unwrap(), 7);
        assert_eq!(v[2], 7);
        assert_eq!(
            v.get(3),
            Err(GeometryError::OutOfRange { index: 3, len: 3 })
        );
        assert!(v.set(5, 1).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_out_of_range_panics() {
        let v = Vector2f::zero();
        let _ = v[2];
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector3i::new(&[1, -2, 3]).to_string(), "(1, -2, 3)");
        assert_eq!(Vector2f::new(&[0.5, 2.0]).to_string(), "(0.5, 2)");
    }

    #[test]
    fn test_algebra_identities() {
        let a = Vector3d::new(&[1.5, -2.0, 4.25]);
        let b = Vector3d::new(&[0.5, 3.0, -1.0]);
        assert_eq!(a + b - b, a);
        assert_eq!((a * 2.0) / 2.0, a);
        assert_eq!(a.dot(&b), b.dot(&a));
        assert_eq!(-(-a), a);

        let mut c = a;
        c += b;
        c -= b;
        c *= 4.0;
        c /= 4.0;
        assert_eq!(c, a);
    }

    #[test]
    fn test_cross_product() {
        let x = Vector3f::new(&[1.0, 0.0, 0.0]);
        let y = Vector3f::new(&[0.0, 1.0, 0.0]);
        assert_eq!(x.cross(&y), Vector3f::new(&[0.0, 0.0, 1.0]));

        let a = Vector3d::new(&[2.0, -1.0, 3.0]);
        let b = Vector3d::new(&[-4.0, 0.5, 1.0]);
        assert_eq!(a.cross(&b), -(b.cross(&a)));
        assert!(a.cross(&a).is_zero());
    }

    #[test]
    fn test_perp() {
        let v = Vector2f::new(&[3.0, 4.0]);
        assert_eq!(v.perp(), Vector2f::new(&[-v[1], v[0]]));
        assert_eq!(v.dot(&v.perp()), 0.0);
        assert_eq!(Vector2i::new(&[1, 2]).perp(), Vector2i::new(&[-2, 1]));
    }

    #[test]
    fn test_length() {
        let v = Vector3f::new(&[3.0, 4.0, 12.0]);
        assert_eq!(v.length(), 13.0);
        assert_eq!(v.length_sq(), 169.0);
        assert!((v.length_sq() - v.length() * v.length()).abs() < 1e-4);
        assert_eq!(Vector3i::new(&[2, 2, 1]).length(), 3);
    }

    #[test]
    fn test_unitize_and_set_length() {
        let mut v = Vector2d::new(&[3.0, 4.0]);
        v.unitize().unwrap();
        assert!((v.length() - 1.0).abs() < 1e-12);

        v.set_length(5.0).unwrap();
        assert!((v.x() - 3.0).abs() < 1e-12);
        assert!((v.y() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_unitize_zero_vector_fails() {
        let mut v = Vector3f::zero();
        assert_eq!(v.unitize(), Err(GeometryError::DivideByZero));
        assert_eq!(v.set_length(2.0), Err(GeometryError::DivideByZero));
        assert!(v.is_zero());
    }

    #[test]
    fn test_distance() {
        let a = Vector3f::new(&[1.0, 1.0, 1.0]);
        let b = Vector3f::new(&[1.0, 4.0, 5.0]);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.distance_to_sq(&b), 25.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_equality_is_exact() {
        let v = Vector3f::new(&[0.1, 0.2, 0.3]);
        assert_eq!(v, v);
        let mut w = v;
        w[1] += f32::EPSILON;
        assert_ne!(v, w);
    }

    #[test]
    fn test_float_division_by_zero_follows_ieee() {
        let v = Vector2f::new(&[1.0, -1.0]) / 0.0;
        assert_eq!(v.x(), f32::INFINITY);
        assert_eq!(v.y(), f32::NEG_INFINITY);
    }

    #[test]
    fn test_nalgebra_conversion() {
        let v = Vector3f::new(&[1.0, 2.0, 3.0]);
        let n: Vector3<f32> = v.into();
        assert_eq!(n, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(Vector3f::from(n), v);
        let p: Point3<f32> = v.into();
        assert_eq!(p.coords, n);
    }
}
