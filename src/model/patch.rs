/// Values that double as "leave unchanged" markers in partial updates.
///
/// Update requests carry `Option<T>` fields, but existing clients send the
/// type's zero value instead of omitting the field, so an
/// empty string, a zero age and the invalid user type are all read as "not
/// requested". A caller therefore cannot set a field to its sentinel.
pub trait Unset {
    fn is_unset(&self) -> bool;
}

impl Unset for String {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Unset for i32 {
    fn is_unset(&self) -> bool {
        *self == 0
    }
}

/// The requested value of a partial-update field, if any.
pub fn requested<T: Unset>(field: &Option<T>) -> Option<&T> {
    field.as_ref().filter(|value| !value.is_unset())
}

/// Overwrite `target` with the requested value, leaving it untouched otherwise.
pub fn apply<T: Unset + Clone>(target: &mut T, field: &Option<T>) {
    if let Some(value) = requested(field) {
        *target = value.clone();
    }
}
