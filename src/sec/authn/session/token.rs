use rand::RngCore;

pub const SESSION_ID_BYTES: usize = 48;

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct SessionToken([u8; SESSION_ID_BYTES]);

impl SessionToken {
    pub fn gen() -> Result<Self, rand::Error> {
        let mut rtn = [0; SESSION_ID_BYTES];

        rand::thread_rng().try_fill_bytes(&mut rtn)?;

        Ok(SessionToken(rtn))
    }
}

impl AsRef<[u8]> for SessionToken {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl From<[u8; SESSION_ID_BYTES]> for SessionToken {
    fn from(bytes: [u8; SESSION_ID_BYTES]) -> Self {
        SessionToken(bytes)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("data does not have the proper length")]
pub struct InvalidLength;

impl TryFrom<&[u8]> for SessionToken {
    type Error = InvalidLength;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        if let Ok(array) = slice.try_into() {
            Ok(SessionToken(array))
        } else {
            Err(InvalidLength)
        }
    }
}
