use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Default)]
pub struct SignupForm {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub username: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Fixed acknowledgment body, `{"res":1,"status":200}`.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Ack {
    pub res: u8,
    pub status: u16,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            res: 1,
            status: 200,
        }
    }
}
