use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use crate::{
    foundation::{
        core::Rgba8,
        error::{AminovizError, AminovizResult},
    },
    render::scene::Label,
};

/// Rasterized node letter, premultiplied RGBA8.
#[derive(Clone, Debug)]
pub(crate) struct LabelRaster {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: Arc<Vec<u8>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct LabelKey {
    letter: char,
    half_px: u16,
    color: [u8; 4],
}

impl LabelKey {
    pub(crate) fn for_label(label: &Label) -> Self {
        let half_px = (label.font_px.max(0.5) * 2.0).round().min(f64::from(u16::MAX)) as u16;
        Self {
            letter: label.letter,
            half_px,
            color: [label.color.r, label.color.g, label.color.b, label.color.a],
        }
    }

    fn font_px(self) -> f64 {
        f64::from(self.half_px) / 2.0
    }
}

/// Bounded LRU of label rasters; letters are laid out by `usvg` against system fonts.
pub(crate) struct LabelCache {
    fontdb: Option<Arc<usvg::fontdb::Database>>,
    rasters: HashMap<LabelKey, LabelRaster>,
    lru: VecDeque<LabelKey>,
    capacity: usize,
}

impl LabelCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            fontdb: None,
            rasters: HashMap::new(),
            lru: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.rasters.len()
    }

    pub(crate) fn get(&mut self, label: &Label) -> AminovizResult<LabelRaster> {
        let key = LabelKey::for_label(label);
        if let Some(r) = self.rasters.get(&key).cloned() {
            self.touch(key);
            return Ok(r);
        }

        tracing::debug!(letter = %key.letter, font_px = key.font_px(), "rasterizing label");
        let fontdb = Arc::clone(self.fontdb.get_or_insert_with(build_fontdb));
        let raster = rasterize_label(key, fontdb)?;
        self.rasters.insert(key, raster.clone());
        self.touch(key);
        while self.lru.len() > self.capacity {
            if let Some(old) = self.lru.pop_front() {
                self.rasters.remove(&old);
            }
        }
        Ok(raster)
    }

    fn touch(&mut self, key: LabelKey) {
        if let Some(pos) = self.lru.iter().position(|k| *k == key) {
            self.lru.remove(pos);
        }
        self.lru.push_back(key);
    }
}

fn build_fontdb() -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system fonts for labels");
    Arc::new(db)
}

/// Square box that comfortably fits one bold glyph.
pub(crate) fn label_box_px(font_px: f64) -> u32 {
    ((font_px * 1.6).ceil() as u32).max(1) + 2
}

pub(crate) fn label_svg(letter: char, font_px: f64, color: Rgba8, box_px: u32) -> String {
    let half = f64::from(box_px) / 2.0;
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{box_px}" height="{box_px}" viewBox="0 0 {box_px} {box_px}"><text x="{half}" y="{half}" font-family="Arial, Helvetica, sans-serif" font-weight="bold" font-size="{font_px}" fill="{fill}" fill-opacity="{opacity}" text-anchor="middle" dominant-baseline="central">{letter}</text></svg>"#,
        fill = color.to_hex_string(),
        opacity = color.alpha_f64(),
    )
}

fn rasterize_label(
    key: LabelKey,
    fontdb: Arc<usvg::fontdb::Database>,
) -> AminovizResult<LabelRaster> {
    let [r, g, b, a] = key.color;
    let font_px = key.font_px();
    let box_px = label_box_px(font_px);
    let svg = label_svg(key.letter, font_px, Rgba8 { r, g, b, a }, box_px);

    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts)
        .map_err(|e| AminovizError::render(format!("label svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(box_px, box_px)
        .ok_or_else(|| AminovizError::render("failed to allocate label pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    Ok(LabelRaster {
        width: box_px,
        height: box_px,
        data: Arc::new(pixmap.data().to_vec()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/label.rs"]
mod tests;
