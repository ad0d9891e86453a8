#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{GrayImage, Luma, Rgb, RgbImage};
use mask2coco::ir::BinaryMask;
use mask2coco::{ImageEntry, MaskAnnotation};

/// Square of foreground pixels with its top-left corner at `(start, start)`.
pub fn square_mask(size: u32, start: u32, side: u32) -> BinaryMask {
    BinaryMask::from_fn(size, size, |x, y| {
        (start..start + side).contains(&x) && (start..start + side).contains(&y)
    })
}

/// A small gradient so written PNGs are not all zeros.
pub fn rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 10 % 256) as u8, (y * 10 % 256) as u8, 128])
    })
}

pub fn entry(size: u32, masks: Vec<(BinaryMask, &str)>) -> ImageEntry {
    ImageEntry::new(
        rgb(size, size),
        masks
            .into_iter()
            .map(|(mask, category)| MaskAnnotation::new(mask, category))
            .collect(),
    )
}

pub fn write_rgb(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    rgb(width, height).save(path).expect("write rgb png");
}

pub fn write_mask(path: &Path, mask: &BinaryMask) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    let (width, height) = mask.dimensions();
    let image = GrayImage::from_fn(width, height, |x, y| {
        Luma([if mask.get(x, y) { 255 } else { 0 }])
    });
    image.save(path).expect("write mask png");
}

/// Writes a one-entry manifest with a 20x20 image and the given masks.
pub fn write_manifest(root: &Path, masks: &[(BinaryMask, &str)]) -> std::path::PathBuf {
    write_rgb(&root.join("rgb/000.png"), 20, 20);
    let mut listed = Vec::new();
    for (i, (mask, category)) in masks.iter().enumerate() {
        let rel = format!("mask/000_{}.png", i);
        write_mask(&root.join(&rel), mask);
        listed.push(serde_json::json!({"mask": rel, "category": category}));
    }
    let manifest = serde_json::json!({
        "name": "scene",
        "entries": [{"image": "rgb/000.png", "masks": listed}]
    });
    let path = root.join("scene.json");
    fs::write(&path, serde_json::to_vec_pretty(&manifest).unwrap()).expect("write manifest");
    path
}

/// Writes one scene folder (`rgb.png` plus `masks/<stem>.png`) under `root`.
pub fn write_scene(root: &Path, scene: &str, masks: &[(BinaryMask, &str)]) {
    let dir = root.join(scene);
    write_rgb(&dir.join("rgb.png"), 20, 20);
    for (mask, stem) in masks {
        write_mask(&dir.join("masks").join(format!("{}.png", stem)), mask);
    }
}
