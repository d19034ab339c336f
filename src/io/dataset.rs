//! Enumeration of a class-labelled image dataset and creation of the mirrored
//! output tree.
//!
//! The input root holds one subdirectory per class label; each contains image
//! files. Folders and files are visited in name order so repeated runs see the
//! same item list.
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{ImageItem, OutputFormat};

fn ensure_input_root(input_root: &Path) -> Result<()> {
    if !input_root.is_dir() {
        return Err(Error::InputNotFound {
            path: input_root.to_path_buf(),
        });
    }
    Ok(())
}

fn is_image_file(path: &Path) -> bool {
    path.is_file() && OutputFormat::from_path(path).is_some()
}

/// Names of the immediate subdirectories of `input_root`, sorted.
pub fn class_folders(input_root: &Path) -> Result<Vec<String>> {
    ensure_input_root(input_root)?;

    let mut classes = Vec::new();
    for entry in fs::read_dir(input_root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            classes.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    classes.sort();
    Ok(classes)
}

/// Lists every image under `input_root/<class>/`, grouped by class, and pairs it
/// with its destination under `output_root/<class>/`.
pub fn scan_dataset(input_root: &Path, output_root: &Path) -> Result<Vec<ImageItem>> {
    let classes = class_folders(input_root)?;
    info!(
        "Found {} class folders: {}",
        classes.len(),
        classes.join(", ")
    );

    let mut items = Vec::new();
    for class in &classes {
        let class_path = input_root.join(class);
        let mut files: Vec<String> = Vec::new();
        for entry in fs::read_dir(&class_path)? {
            let entry = entry?;
            if is_image_file(&entry.path()) {
                files.push(entry.file_name().to_string_lossy().into_owned());
            } else {
                debug!("Skipping non-image entry: {:?}", entry.path());
            }
        }
        files.sort();
        debug!("{} images in '{}'", files.len(), class);

        items.extend(
            files
                .iter()
                .map(|name| ImageItem::new(output_root, class_path.join(name), class, name)),
        );
    }

    Ok(items)
}

/// Creates `output_root` and one subdirectory per class label.
pub fn prepare_output_tree(output_root: &Path, classes: &[String]) -> Result<()> {
    fs::create_dir_all(output_root)?;
    for class in classes {
        fs::create_dir_all(output_root.join(class))?;
    }
    Ok(())
}
