//! Файловый носитель: каталог, файл-на-ключ, CRC-фреймы, эксклюзивный LOCK.
//!
//! Формат value-файла: [MAGIC4="SR1V"][len u32 LE][crc32 u32 LE][payload].
//! Запись — tmp+rename (+sync_all best-effort): частично записанный фрейм
//! либо не попадёт на место, либо не пройдёт CRC и будет прочитан как None.
//!
//! LOCK: эксклюзивная advisory-блокировка на весь срок жизни носителя —
//! правило «один писатель» между процессами. Повторное открытие того же
//! каталога при живом носителе — ошибка.
//!
//! ENOSPC/квота при записи → CapacityWrite (см. error.rs), прочее → Io.

use byteorder::{ByteOrder, LittleEndian};
use fs2::FileExt;
use log::warn;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use super::{validate_key, Storage};
use crate::consts::{LOCK_FILE, VALUE_FILE_EXT, VALUE_HDR_SIZE, VALUE_MAGIC};
use crate::error::StoreError;

pub struct FileStorage {
    root: PathBuf,
    // Держим файл открытым: блокировка снимается на Drop.
    _lock: File,
}

impl FileStorage {
    /// Открыть или создать носитель в каталоге root.
    pub fn open_or_create<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            fs::create_dir_all(&root)
                .map_err(|e| StoreError::io(format!("create {}", root.display()), e))?;
        }
        let lock_path = root.join(LOCK_FILE);
        let lock = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| StoreError::io(format!("open lock {}", lock_path.display()), e))?;
        lock.try_lock_exclusive()
            .map_err(|e| StoreError::io(format!("lock_exclusive {}", lock_path.display()), e))?;
        Ok(Self { root, _lock: lock })
    }

    /// Корневой каталог носителя.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, VALUE_FILE_EXT))
    }

    fn encode_frame(value: &[u8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(VALUE_HDR_SIZE + value.len());
        buf.extend_from_slice(VALUE_MAGIC);
        let mut hdr = [0u8; 8];
        LittleEndian::write_u32(&mut hdr[0..4], value.len() as u32);
        LittleEndian::write_u32(&mut hdr[4..8], crc32fast::hash(value));
        buf.extend_from_slice(&hdr);
        buf.extend_from_slice(value);
        buf
    }

    fn decode_frame(key: &str, raw: &[u8]) -> Option<Vec<u8>> {
        if raw.len() < VALUE_HDR_SIZE || &raw[0..4] != VALUE_MAGIC {
            warn!("value frame for '{}': bad magic/size, treating as absent", key);
            return None;
        }
        let len = LittleEndian::read_u32(&raw[4..8]) as usize;
        let crc = LittleEndian::read_u32(&raw[8..12]);
        let payload = &raw[VALUE_HDR_SIZE..];
        if payload.len() != len || crc32fast::hash(payload) != crc {
            warn!("value frame for '{}': CRC/len mismatch, treating as absent", key);
            return None;
        }
        Some(payload.to_vec())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        validate_key(key)?;
        let p = self.value_path(key);
        let mut f = match OpenOptions::new().read(true).open(&p) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(format!("open {}", p.display()), e)),
        };
        let mut raw = Vec::new();
        f.read_to_end(&mut raw)
            .map_err(|e| StoreError::io(format!("read {}", p.display()), e))?;
        Ok(Self::decode_frame(key, &raw))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        let p = self.value_path(key);
        let tmp = p.with_extension("tmp");
        let frame = Self::encode_frame(value);

        let write_res = (|| -> std::io::Result<()> {
            let mut f = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp)?;
            f.write_all(&frame)?;
            let _ = f.sync_all();
            Ok(())
        })();
        if let Err(e) = write_res {
            let _ = fs::remove_file(&tmp);
            return Err(map_write_err(key, &tmp, e));
        }

        fs::rename(&tmp, &p).map_err(|e| map_write_err(key, &p, e))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let p = self.value_path(key);
        match fs::remove_file(&p) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(format!("remove {}", p.display()), e)),
        }
    }
}

/// ENOSPC/квота → CapacityWrite, прочее → Io.
fn map_write_err(key: &str, path: &Path, e: std::io::Error) -> StoreError {
    match e.kind() {
        ErrorKind::StorageFull | ErrorKind::QuotaExceeded => StoreError::CapacityWrite {
            key: key.to_string(),
        },
        _ => StoreError::io(format!("write {}", path.display()), e),
    }
}
