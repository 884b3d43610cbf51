use crate::config::Config;
use crate::errors::{BacklightError, Result};
use log::{debug, info};
use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Longest attribute content accepted from sysfs
const MAX_ATTR_LEN: u64 = 64;

/// Attribute of a backlight device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceValue {
    /// `brightness`, read-write
    Current,
    /// `max_brightness`, read-only
    Max,
}

impl DeviceValue {
    pub fn file_name(self) -> &'static str {
        match self {
            DeviceValue::Current => "brightness",
            DeviceValue::Max => "max_brightness",
        }
    }
}

/// Storage for a backlight's brightness attributes
pub trait DeviceStore {
    fn read(&self, which: DeviceValue) -> Result<u32>;

    /// Write the current brightness
    fn write(&self, value: u32) -> Result<()>;

    /// Path used in error messages for `which`
    fn attribute_path(&self, which: DeviceValue) -> PathBuf;
}

/// Backlight device backed by a sysfs directory such as
/// `/sys/class/backlight/intel_backlight`
#[derive(Debug, Clone)]
pub struct SysfsDevice {
    path: PathBuf,
}

impl SysfsDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.device_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Check that both brightness attributes are present
    pub fn exists(&self) -> bool {
        [DeviceValue::Current, DeviceValue::Max]
            .iter()
            .all(|v| self.attribute_path(*v).is_file())
    }
}

/// Read at most `MAX_ATTR_LEN` bytes of an attribute and parse it.
fn read_attribute(path: &Path) -> Result<u32> {
    let read_err = |source| BacklightError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::open(path).map_err(read_err)?;
    let mut buf = Vec::new();
    file.take(MAX_ATTR_LEN + 1)
        .read_to_end(&mut buf)
        .map_err(read_err)?;

    let parse_err = |content: String| BacklightError::Parse {
        path: path.to_path_buf(),
        content,
    };

    if buf.len() as u64 > MAX_ATTR_LEN {
        return Err(parse_err(String::from_utf8_lossy(&buf).to_string()));
    }
    let content = std::str::from_utf8(&buf)
        .map_err(|_| parse_err(String::from_utf8_lossy(&buf).to_string()))?;
    content
        .trim()
        .parse::<u32>()
        .map_err(|_| parse_err(content.trim().to_string()))
}

impl DeviceStore for SysfsDevice {
    fn read(&self, which: DeviceValue) -> Result<u32> {
        let path = self.attribute_path(which);
        let value = read_attribute(&path)?;
        debug!("Read {} = {} from {}", which.file_name(), value, path.display());
        Ok(value)
    }

    fn write(&self, value: u32) -> Result<()> {
        let path = self.attribute_path(DeviceValue::Current);
        let write_err = |source: io::Error| BacklightError::Write {
            path: path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(write_err)?;
        file.write_all(value.to_string().as_bytes())
            .map_err(write_err)?;
        file.flush().map_err(write_err)?;

        info!("Set {} brightness to {}", self.name(), value);
        Ok(())
    }

    fn attribute_path(&self, which: DeviceValue) -> PathBuf {
        self.path.join(which.file_name())
    }
}

/// In-memory backlight, records every value written
#[derive(Debug)]
pub struct MemoryDevice {
    current: RefCell<u32>,
    max: u32,
    fail_read: Option<DeviceValue>,
    fail_write: bool,
    writes: RefCell<Vec<u32>>,
}

impl MemoryDevice {
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: RefCell::new(current),
            max,
            fail_read: None,
            fail_write: false,
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Make reads of `which` fail with a not-found error
    pub fn failing_read(mut self, which: DeviceValue) -> Self {
        self.fail_read = Some(which);
        self
    }

    /// Make every write fail with a permission error
    pub fn failing_write(mut self) -> Self {
        self.fail_write = true;
        self
    }

    pub fn current(&self) -> u32 {
        *self.current.borrow()
    }

    pub fn writes(&self) -> Vec<u32> {
        self.writes.borrow().clone()
    }
}

impl DeviceStore for MemoryDevice {
    fn read(&self, which: DeviceValue) -> Result<u32> {
        if self.fail_read == Some(which) {
            return Err(BacklightError::Read {
                path: self.attribute_path(which),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        Ok(match which {
            DeviceValue::Current => self.current(),
            DeviceValue::Max => self.max,
        })
    }

    fn write(&self, value: u32) -> Result<()> {
        if self.fail_write {
            return Err(BacklightError::Write {
                path: self.attribute_path(DeviceValue::Current),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        *self.current.borrow_mut() = value;
        self.writes.borrow_mut().push(value);
        Ok(())
    }

    fn attribute_path(&self, which: DeviceValue) -> PathBuf {
        PathBuf::from("memory").join(which.file_name())
    }
}
