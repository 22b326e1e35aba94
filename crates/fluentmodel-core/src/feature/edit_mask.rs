//! Edit-mask extensions, available only for member value types that can
//! carry a mask.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::builder::sink::keys;
use crate::builder::{DirectiveSink, MemberBuilder};
use crate::context::ModelType;
use crate::resolver::Untyped;

/// Value types an edit mask can be applied to.
pub trait MaskableValue {}

/// Textual value types, which also accept regular-expression masks.
pub trait TextValue: MaskableValue {}

macro_rules! maskable {
    ($($ty:ty),* $(,)?) => {
        $(impl MaskableValue for $ty {})*
    };
}

maskable!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, Duration, NaiveDate,
    NaiveTime, NaiveDateTime,
);

impl MaskableValue for String {}
impl TextValue for String {}

impl<Tz: TimeZone> MaskableValue for DateTime<Tz> {}
impl<M: MaskableValue> MaskableValue for Option<M> {}
impl<M: TextValue> TextValue for Option<M> {}

// Members selected by name have no static value type; the registry decides.
impl MaskableValue for Untyped {}
impl TextValue for Untyped {}

pub trait EditMaskExt {
    fn has_edit_mask(&mut self, mask: &str) -> &mut Self;
}

impl<T: ModelType, P: MaskableValue + 'static> EditMaskExt for MemberBuilder<T, P> {
    fn has_edit_mask(&mut self, mask: &str) -> &mut Self {
        self.with_model_default(keys::EDIT_MASK, mask)
    }
}

pub trait RegexEditMaskExt {
    /// Write `regex` as the mask and mark the mask type as a regular
    /// expression.
    fn has_regex_edit_mask(&mut self, regex: &str) -> &mut Self;
}

impl<T: ModelType, P: TextValue + 'static> RegexEditMaskExt for MemberBuilder<T, P> {
    fn has_regex_edit_mask(&mut self, regex: &str) -> &mut Self {
        self.has_edit_mask(regex)
            .with_model_default(keys::EDIT_MASK_TYPE, keys::REGEX_MASK_TYPE)
    }
}
