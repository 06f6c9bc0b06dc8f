use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

/// Input bytes held as either a read-only mmap or an owned Vec.
/// Dereferences to `&[u8]` so the codecs never care which.
pub enum InputData {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Deref for InputData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            InputData::Mmap(m) => m,
            InputData::Owned(v) => v,
        }
    }
}

/// Files under 1MB are cheaper to read() than to map.
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read a whole input. `-` means standard input.
pub fn read_input(path: &str) -> io::Result<InputData> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        return Ok(InputData::Owned(buf));
    }
    read_file(Path::new(path))
}

/// Read a file, mapping it when it is a large regular file.
pub fn read_file(path: &Path) -> io::Result<InputData> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;
    let len = metadata.len();

    if len >= MMAP_THRESHOLD && metadata.file_type().is_file() {
        // SAFETY: read-only mapping; the codecs only read the bytes.
        if let Ok(mmap) = unsafe { MmapOptions::new().map(&file) } {
            log::trace!("mapped {} ({} bytes)", path.display(), len);
            return Ok(InputData::Mmap(mmap));
        }
        log::debug!("mmap of {} failed, falling back to read", path.display());
    }

    let mut buf = Vec::with_capacity(len as usize);
    let mut reader = file;
    reader.read_to_end(&mut buf)?;
    Ok(InputData::Owned(buf))
}
