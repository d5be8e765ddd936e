use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::net::{SocketAddr, IpAddr, Ipv6Addr};
use std::time::Duration;
use std::fmt::{Display, Formatter};

use clap::Parser;

use crate::error::{self, Context};

mod shape;

pub type Kdf = hkdf::Hkdf<sha3::Sha3_512>;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LISTENER: &str = "default";

#[derive(Debug, Parser)]
#[command(author, version ,about, long_about = None)]
pub struct CliArgs {
    /// a config file to load settings from, later files override earlier ones
    #[arg(long)]
    config: Vec<PathBuf>
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    pub kdf: Kdf,
}

pub fn get_config() -> error::Result<Config> {
    Config::from_args(CliArgs::parse())
}

impl Config {
    pub fn from_args(args: CliArgs) -> error::Result<Self> {
        let cwd = std::env::current_dir()
            .context("failed to retrieve cwd for Settings")?;
        let mut settings = Settings::default();

        for config_path in args.config {
            let full = if config_path.is_absolute() {
                config_path
            } else {
                cwd.join(config_path)
            };

            tracing::debug!("loading config file \"{}\"", full.display());

            let loaded = Self::load_file(&full)?;
            let src = SrcFile::new(&full);
            let dot = DotPath::new(&"settings");

            settings.merge(&src, dot, loaded)?;
        }

        settings.ensure_listener();

        tracing::debug!(
            listeners = settings.listeners.len(),
            timeout = ?settings.timeout,
            session_ttl = ?settings.sec.session.ttl,
            "settings loaded"
        );

        Ok(Config::from_settings(settings))
    }

    pub fn from_settings(settings: Settings) -> Self {
        let kdf = hkdf::Hkdf::<sha3::Sha3_512>::new(None, settings.master_key.as_bytes());

        Config {
            settings,
            kdf
        }
    }

    fn load_file(path: &Path) -> error::Result<shape::Settings> {
        let ext = path.extension().context(format!(
            "failed to retrieve the file extension for config file: \"{}\"", path.display()
        ))?;

        let file = std::fs::OpenOptions::new()
            .read(true)
            .open(path)
            .context(format!("failed to open config file: \"{}\"", path.display()))?;
        let reader = std::io::BufReader::new(file);

        match ext.to_ascii_lowercase().to_str() {
            Some("yaml" | "yml") => serde_yaml::from_reader(reader).context(format!(
                "failed to parse yaml config file: \"{}\"", path.display()
            )),
            Some("json") => serde_json::from_reader(reader).context(format!(
                "failed to parse json config file: \"{}\"", path.display()
            )),
            _ => Err(error::Error::new().message(format!(
                "unknown type of config file: \"{}\"", path.display()
            )))
        }
    }
}

struct SrcFile<'a> {
    src: &'a Path,
}

impl<'a> SrcFile<'a> {
    fn new(src: &'a Path) -> Self {
        SrcFile { src }
    }
}

impl<'a> Display for SrcFile<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.src.display())
    }
}

struct Quote<'a>(&'a dyn Display);

impl<'a> Display for Quote<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

struct DotPath<'a>(Vec<&'a dyn Display>);

impl<'a> DotPath<'a> {
    fn new(name: &'a dyn Display) -> Self {
        DotPath(vec![name])
    }

    fn push(&self, name: &'a dyn Display) -> Self {
        let mut path = self.0.clone();
        path.push(name);

        DotPath(path)
    }
}

impl<'a> Display for DotPath<'a> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;

        for name in &self.0 {
            if first {
                write!(fmt, "{name}")?;
                first = false;
            } else {
                write!(fmt, ".{name}")?;
            }
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct Settings {
    pub master_key: String,
    pub listeners: HashMap<String, Listener>,
    pub sec: Sec,
    pub timeout: Duration,
}

impl Settings {
    fn merge(&mut self, src: &SrcFile<'_>, dot: DotPath<'_>, settings: shape::Settings) -> error::Result<()> {
        if let Some(master_key) = settings.master_key {
            if master_key.is_empty() {
                return Err(error::Error::new().message(format!(
                    "{}.master_key cannot be empty. file: {src}", dot
                )));
            }

            self.master_key = master_key;
        }

        if let Some(listeners) = settings.listeners {
            for (key, listener) in listeners {
                if let Some(found) = self.listeners.get_mut(&key) {
                    found.merge(src, dot.push(&"listeners").push(&Quote(&key)), listener)?;
                } else {
                    let mut default = Listener::default();
                    default.merge(src, dot.push(&"listeners").push(&Quote(&key)), listener)?;

                    self.listeners.insert(key, default);
                }
            }
        }

        if let Some(sec) = settings.sec {
            self.sec.merge(src, dot.push(&"sec"), sec)?;
        }

        if let Some(timeout) = settings.timeout {
            if timeout == 0 {
                return Err(error::Error::new().message(format!(
                    "{}.timeout must be greater than 0. file: {src}", dot
                )));
            }

            self.timeout = Duration::from_secs(timeout);
        }

        Ok(())
    }

    fn ensure_listener(&mut self) {
        if self.listeners.is_empty() {
            self.listeners.insert(DEFAULT_LISTENER.into(), Listener::default());
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            master_key: "trivia_master_key_secret".into(),
            listeners: HashMap::new(),
            sec: Sec::default(),
            timeout: Duration::from_secs(90),
        }
    }
}

#[derive(Debug)]
pub struct Listener {
    pub addr: SocketAddr,
}

impl Listener {
    fn merge(&mut self, src: &SrcFile<'_>, dot_path: DotPath<'_>, listener: shape::Listener) -> error::Result<()> {
        self.addr = match SocketAddr::from_str(&listener.addr) {
            Ok(valid) => valid,
            Err(_) => match IpAddr::from_str(&listener.addr) {
                Ok(valid) => SocketAddr::from((valid, DEFAULT_PORT)),
                Err(_) => {
                    return Err(error::Error::new().message(format!(
                        "{dot_path}.addr invalid: \"{}\" file: {src}", listener.addr
                    )));
                }
            }
        };

        Ok(())
    }
}

impl Default for Listener {
    fn default() -> Self {
        Listener {
            addr: SocketAddr::from((Ipv6Addr::UNSPECIFIED, DEFAULT_PORT)),
        }
    }
}

#[derive(Debug, Default)]
pub struct Sec {
    pub session: Session,
}

impl Sec {
    fn merge(&mut self, src: &SrcFile<'_>, dot: DotPath<'_>, sec: shape::Sec) -> error::Result<()> {
        if let Some(session) = sec.session {
            self.session.merge(src, dot.push(&"session"), session)?;
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct Session {
    pub ttl: Duration,
    pub capacity: u64,
}

impl Session {
    fn merge(&mut self, src: &SrcFile<'_>, dot: DotPath<'_>, session: shape::Session) -> error::Result<()> {
        if let Some(ttl) = session.ttl {
            self.ttl = Duration::from_secs(ttl);
        }

        if let Some(capacity) = session.capacity {
            if capacity == 0 {
                return Err(error::Error::new().message(format!(
                    "{}.capacity must be greater than 0. file: {src}", dot
                )));
            }

            self.capacity = capacity;
        }

        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Session {
            ttl: Duration::from_secs(60 * 60 * 24 * 7),
            capacity: 10_000,
        }
    }
}
