use crate::ApiError;

pub trait Validator {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }
}
