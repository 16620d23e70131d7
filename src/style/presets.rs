use crate::foundation::error::{PolishError, PolishResult};
use crate::style::color::{Color, rgb};
use crate::style::model::{Background, MeshBlob};

/// A named two-stop gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientPreset {
    pub name: &'static str,
    pub from: Color,
    pub to: Color,
    pub angle: f64,
}

/// A named mesh background: base fill plus three blobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshPreset {
    pub name: &'static str,
    pub base: Color,
    pub blobs: [MeshBlob; 3],
}

const fn grad(name: &'static str, from: u32, to: u32, angle: f64) -> GradientPreset {
    GradientPreset {
        name,
        from: rgb(from),
        to: rgb(to),
        angle,
    }
}

const fn blob(cx: f64, cy: f64, r: f64, color: u32) -> MeshBlob {
    MeshBlob {
        cx,
        cy,
        r,
        color: rgb(color),
    }
}

const fn mesh(name: &'static str, base: u32, blobs: [MeshBlob; 3]) -> MeshPreset {
    MeshPreset {
        name,
        base: rgb(base),
        blobs,
    }
}

pub const GRADIENTS: [GradientPreset; 16] = [
    grad("Indigo Dream", 0x6366f1, 0x8b5cf6, 135.0),
    grad("Rose Gold", 0xf43f5e, 0xfb923c, 135.0),
    grad("Ocean Breeze", 0x06b6d4, 0x3b82f6, 135.0),
    grad("Emerald", 0x10b981, 0x059669, 135.0),
    grad("Sunset", 0xf59e0b, 0xef4444, 135.0),
    grad("Midnight", 0x1e1b4b, 0x312e81, 135.0),
    grad("Peach", 0xfda4af, 0xfb923c, 135.0),
    grad("Cotton Candy", 0xe879f9, 0x818cf8, 135.0),
    grad("Forest", 0x166534, 0x15803d, 160.0),
    grad("Deep Space", 0x0f0c29, 0x302b63, 135.0),
    grad("Aurora", 0x00c9ff, 0x92fe9d, 120.0),
    grad("Flamingo", 0xf953c6, 0xb91d73, 135.0),
    grad("Arctic", 0x243b55, 0x141e30, 135.0),
    grad("Lemon Lime", 0xf7971e, 0xffd200, 135.0),
    grad("Purple Haze", 0x4776e6, 0x8e54e9, 135.0),
    grad("Mint", 0x00b09b, 0x96c93d, 135.0),
];

pub const SOLID_COLORS: [Color; 20] = [
    rgb(0x0d0d12),
    rgb(0x14141e),
    rgb(0x1a1a2e),
    rgb(0x1e1e30),
    rgb(0x0f172a),
    rgb(0x1e293b),
    rgb(0x0c1a2e),
    rgb(0x0a192f),
    rgb(0xffffff),
    rgb(0xf8fafc),
    rgb(0xf1f5f9),
    rgb(0xe2e8f0),
    rgb(0x111827),
    rgb(0x1f2937),
    rgb(0x374151),
    rgb(0x6b7280),
    rgb(0x0f0c29),
    rgb(0x200122),
    rgb(0x1a0a2e),
    rgb(0x09093d),
];

pub const MESHES: [MeshPreset; 8] = [
    mesh(
        "Purple Haze",
        0x0d0d1f,
        [
            blob(0.2, 0.5, 0.6, 0x6366f1),
            blob(0.8, 0.2, 0.5, 0x8b5cf6),
            blob(0.5, 0.8, 0.4, 0x4f46e5),
        ],
    ),
    mesh(
        "Ocean Mesh",
        0x0a1628,
        [
            blob(0.3, 0.4, 0.6, 0x06b6d4),
            blob(0.7, 0.6, 0.5, 0x3b82f6),
            blob(0.1, 0.9, 0.4, 0x0284c7),
        ],
    ),
    mesh(
        "Rose Mesh",
        0x1a0a14,
        [
            blob(0.6, 0.3, 0.6, 0xf43f5e),
            blob(0.2, 0.7, 0.5, 0xec4899),
            blob(0.9, 0.8, 0.4, 0xdb2777),
        ],
    ),
    mesh(
        "Emerald Mesh",
        0x021a10,
        [
            blob(0.4, 0.6, 0.6, 0x10b981),
            blob(0.8, 0.2, 0.5, 0x059669),
            blob(0.1, 0.3, 0.4, 0x34d399),
        ],
    ),
    mesh(
        "Golden Hour",
        0x1a100a,
        [
            blob(0.5, 0.5, 0.7, 0xf59e0b),
            blob(0.9, 0.1, 0.4, 0xef4444),
            blob(0.1, 0.9, 0.4, 0xfb923c),
        ],
    ),
    mesh(
        "Cool Dark",
        0x050510,
        [
            blob(0.3, 0.3, 0.6, 0x1e40af),
            blob(0.7, 0.7, 0.5, 0x312e81),
            blob(0.8, 0.2, 0.3, 0x4f46e5),
        ],
    ),
    mesh(
        "Cotton Candy",
        0x1a0a1f,
        [
            blob(0.2, 0.3, 0.6, 0xe879f9),
            blob(0.8, 0.7, 0.5, 0x818cf8),
            blob(0.5, 1.0, 0.4, 0xc084fc),
        ],
    ),
    mesh(
        "Aurora",
        0x010f0a,
        [
            blob(0.5, 0.0, 0.6, 0x00c9ff),
            blob(0.0, 1.0, 0.6, 0x92fe9d),
            blob(1.0, 0.5, 0.4, 0x38bdf8),
        ],
    ),
];

impl GradientPreset {
    pub fn background(&self) -> Background {
        Background::Gradient {
            from: self.from,
            to: self.to,
            angle: self.angle,
        }
    }
}

impl MeshPreset {
    pub fn background(&self) -> Background {
        Background::Mesh {
            base: self.base,
            blobs: self.blobs.to_vec(),
        }
    }
}

impl Background {
    /// Resolve a named preset.
    ///
    /// Accepts `gradient:<name>`, `mesh:<name>` or `solid:<index>`; a bare name searches gradients
    /// first, then meshes. Names compare case-insensitively.
    pub fn preset(name: &str) -> PolishResult<Self> {
        let name = name.trim();
        let (family, key) = match name.split_once(':') {
            Some((f, k)) => (Some(f.trim()), k.trim()),
            None => (None, name),
        };

        let gradient = || {
            GRADIENTS
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(key))
                .map(GradientPreset::background)
        };
        let mesh = || {
            MESHES
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(key))
                .map(MeshPreset::background)
        };

        let found = match family {
            None => gradient().or_else(mesh),
            Some(f) if f.eq_ignore_ascii_case("gradient") => gradient(),
            Some(f) if f.eq_ignore_ascii_case("mesh") => mesh(),
            Some(f) if f.eq_ignore_ascii_case("solid") => key
                .parse::<usize>()
                .ok()
                .and_then(|i| SOLID_COLORS.get(i))
                .map(|&color| Background::Solid { color }),
            Some(_) => None,
        };
        found.ok_or_else(|| PolishError::invalid_input(format!("unknown preset \"{name}\"")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/presets.rs"]
mod tests;
