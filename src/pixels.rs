use crate::UnsupportedSampleTypeError;

/// Type of components of texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SampleType {
    /// Unsigned 8-bit component
    #[default]
    U8,
}

impl SampleType {
    /// Numeric identifier of the sample type.
    pub fn id(self) -> i32 {
        match self {
            Self::U8 => 1,
        }
    }
}

impl TryFrom<i32> for SampleType {
    type Error = UnsupportedSampleTypeError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Self::U8),
            _ => Err(UnsupportedSampleTypeError(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_type_identifiers() {
        assert_eq!(SampleType::try_from(1), Ok(SampleType::U8));
        assert_eq!(SampleType::U8.id(), 1);
        for id in [0, 2, -1] {
            assert_eq!(SampleType::try_from(id), Err(UnsupportedSampleTypeError(id)));
        }
    }
}
