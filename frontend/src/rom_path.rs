use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read a ROM image: a raw `.gb`/`.gbc` file, or the first such entry
/// inside a zip archive.
pub fn read_rom(path: &Path) -> Result<Vec<u8>, io::Error> {
    let is_zip = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if !is_zip {
        return std::fs::read(path);
    }

    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(io::Error::other)?;
    let entry_name = archive
        .file_names()
        .find(|name| {
            let lower = name.to_ascii_lowercase();
            lower.ends_with(".gb") || lower.ends_with(".gbc")
        })
        .map(String::from)
        .ok_or_else(|| io::Error::other(format!("no .gb entry in {}", path.display())))?;

    let mut data = Vec::new();
    archive
        .by_name(&entry_name)
        .map_err(io::Error::other)?
        .read_to_end(&mut data)?;
    Ok(data)
}
