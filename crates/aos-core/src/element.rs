//! Field-level copy contract for element types.

/// Field-by-field copy between two instances of the same element type.
///
/// Implemented by element types that take part in shallow copies between
/// structured arrays. The destination keeps its own identity and address;
/// only its field values change. Referenced sub-objects are not deep-copied.
pub trait ShallowCopy {
    /// `true` if the type has fields that are normally fixed once the value
    /// is constructed. Shallow copies into such a type are refused unless
    /// the caller explicitly allows overwriting them.
    const HAS_FINAL_FIELDS: bool = false;

    /// Overwrite every field of `self` with the corresponding field of `source`.
    fn copy_fields_from(&mut self, source: &Self);
}

macro_rules! impl_shallow_copy_for_copy_types {
    ($($t:ty),* $(,)?) => {
        $(
            impl ShallowCopy for $t {
                fn copy_fields_from(&mut self, source: &Self) {
                    *self = *source;
                }
            }
        )*
    };
}

impl_shallow_copy_for_copy_types!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);
