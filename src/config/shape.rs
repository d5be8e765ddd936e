use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Session {
    /// seconds a session stays valid after login
    pub ttl: Option<u64>,
    pub capacity: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Sec {
    pub session: Option<Session>,
}

#[derive(Debug, Deserialize)]
pub struct Listener {
    pub addr: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub master_key: Option<String>,

    pub listeners: Option<HashMap<String, Listener>>,

    pub sec: Option<Sec>,

    /// seconds before a request is abandoned
    pub timeout: Option<u64>,
}
