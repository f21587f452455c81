//! Texture lookup and item details generation.
//!
//! Texture files in the resource pack do not follow item identifiers
//! exactly (`planks_acacia`, `door_wood_upper`, ...), so a lookup tries a
//! list of candidate file names derived from the requested name and takes
//! the first that exists.

use craftbook_core::id::ItemId;
use craftbook_core::item::{ItemDetails, PLACEHOLDER_ICON};
use indexmap::{IndexMap, IndexSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Wood variants used as name prefixes or suffixes in texture names.
pub const WOOD_TYPES: &[&str] = &[
    "acacia", "birch", "cherry", "dark_oak", "jungle", "mangrove", "oak", "spruce", "bamboo",
    "crimson", "warped", "pale_oak",
];

/// Suffixes of blocks drawn with their base block's texture.
pub const DERIVATIVE_SUFFIXES: &[&str] = &[
    "_stairs",
    "_slab",
    "_wall",
    "_fence",
    "_fence_gate",
    "_button",
    "_pressure_plate",
    "_carpet",
];

/// Which texture tree to look in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Block,
    Item,
}

impl TextureKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            TextureKind::Block => "blocks",
            TextureKind::Item => "items",
        }
    }

    /// Public path a texture named `name` is served from.
    pub fn public_path(&self, name: &str) -> String {
        format!("/textures/{}/{name}.png", self.dir_name())
    }
}

/// Resolves a texture name to the public path of an available texture.
pub trait TextureResolver {
    fn resolve(&mut self, name: &str, kind: TextureKind) -> Option<String>;

    /// Number of texture files written so far.
    fn copied(&self) -> usize {
        0
    }
}

// ===========================================================================
// Candidate names
// ===========================================================================

fn reversed_pair(name: &str) -> Option<String> {
    let parts: Vec<&str> = name.split('_').collect();
    match parts.as_slice() {
        [a, b] => Some(format!("{b}_{a}")),
        _ => None,
    }
}

/// Source file names (without extension) to try for `name`, in order.
pub fn candidate_names(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];

    names.extend(reversed_pair(name));

    let has_wood_prefix = WOOD_TYPES
        .iter()
        .any(|wood| name.starts_with(&format!("{wood}_")));
    if !has_wood_prefix && !name.starts_with("stripped_") {
        for wood in WOOD_TYPES {
            names.push(format!("{wood}_{name}"));
            names.push(format!("{name}_{wood}"));
        }
    }

    for suffix in DERIVATIVE_SUFFIXES {
        if let Some(base) = name.strip_suffix(suffix) {
            names.push(base.to_string());
            names.extend(reversed_pair(base));
        }
    }

    if name.contains("door") {
        names.push(format!("{name}_upper"));
        names.push(format!("{name}_lower"));
        names.push(format!("{name}_top"));
        if let [first, _] = name.split('_').collect::<Vec<_>>().as_slice() {
            names.push(format!("door_{first}_upper"));
            names.push(format!("door_{first}_lower"));
        }
    }

    names
}

// ===========================================================================
// Filesystem resolver
// ===========================================================================

/// Looks textures up in the resource pack and optionally copies the match
/// into the public asset tree under the requested name.
#[derive(Debug)]
pub struct FsTextureResolver {
    block_dir: PathBuf,
    item_dir: PathBuf,
    public_dir: PathBuf,
    copy: bool,
    copied: usize,
}

impl FsTextureResolver {
    pub fn new(block_dir: &Path, item_dir: &Path, public_dir: &Path, copy: bool) -> Self {
        Self {
            block_dir: block_dir.to_path_buf(),
            item_dir: item_dir.to_path_buf(),
            public_dir: public_dir.to_path_buf(),
            copy,
            copied: 0,
        }
    }

    fn source_dir(&self, kind: TextureKind) -> &Path {
        match kind {
            TextureKind::Block => &self.block_dir,
            TextureKind::Item => &self.item_dir,
        }
    }

    fn copy_to_public(&mut self, source: &Path, name: &str, kind: TextureKind) -> bool {
        let dest_dir = self.public_dir.join("textures").join(kind.dir_name());
        let result = std::fs::create_dir_all(&dest_dir)
            .and_then(|_| std::fs::copy(source, dest_dir.join(format!("{name}.png"))));
        match result {
            Ok(_) => {
                self.copied += 1;
                true
            }
            Err(e) => {
                debug!(source = %source.display(), error = %e, "texture copy failed");
                false
            }
        }
    }
}

impl TextureResolver for FsTextureResolver {
    fn resolve(&mut self, name: &str, kind: TextureKind) -> Option<String> {
        for candidate in candidate_names(name) {
            let source = self.source_dir(kind).join(format!("{candidate}.png"));
            if !source.is_file() {
                continue;
            }
            if self.copy && !self.copy_to_public(&source, name, kind) {
                continue;
            }
            return Some(kind.public_path(name));
        }
        None
    }

    fn copied(&self) -> usize {
        self.copied
    }
}

// ===========================================================================
// Item details
// ===========================================================================

/// Block icon for `id`: top and side faces when both exist, otherwise
/// whichever one was found.
fn block_icon(id: &str, resolver: &mut impl TextureResolver) -> Vec<String> {
    let top = resolver.resolve(&format!("{id}_top"), TextureKind::Block);
    let side = resolver
        .resolve(&format!("{id}_side"), TextureKind::Block)
        .or_else(|| resolver.resolve(id, TextureKind::Block));
    top.into_iter().chain(side).collect()
}

/// Icon paths for one item, falling back to the placeholder.
pub fn item_icon(id: &str, resolver: &mut impl TextureResolver) -> Vec<String> {
    let mut icon = Vec::new();

    if let Some(base) = id.strip_suffix("_block") {
        icon = block_icon(id, resolver);
        if icon.is_empty() {
            icon = block_icon(base, resolver);
        }
    }

    if icon.is_empty() {
        icon = match resolver.resolve(id, TextureKind::Item) {
            Some(path) => vec![path],
            None => block_icon(id, resolver),
        };
    }

    if icon.is_empty() {
        let placeholder = resolver
            .resolve("stick", TextureKind::Item)
            .unwrap_or_else(|| PLACEHOLDER_ICON.to_string());
        icon.push(placeholder);
    }

    icon
}

/// Details for every item, in item order.
pub fn build_item_details(
    items: &IndexSet<ItemId>,
    resolver: &mut impl TextureResolver,
) -> IndexMap<ItemId, ItemDetails> {
    let details: IndexMap<ItemId, ItemDetails> = items
        .iter()
        .map(|id| {
            let icon = item_icon(id.as_str(), resolver);
            (id.clone(), ItemDetails::new(id.clone(), icon))
        })
        .collect();
    info!(
        items = details.len(),
        textures_copied = resolver.copied(),
        "generated item details"
    );
    details
}
