//! Surface material coefficients.

use glam::DVec3;

/// Phong-style material: per-channel ambient, diffuse, specular,
/// transparency and reflectivity coefficients plus a shininess exponent.
///
/// Defaults describe an inert surface: full ambient, everything else off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient coefficient.
    pub ka: DVec3,
    /// Diffuse coefficient.
    pub kd: DVec3,
    /// Specular coefficient.
    pub ks: DVec3,
    /// Transparency coefficient.
    pub kt: DVec3,
    /// Reflectivity coefficient.
    pub kr: DVec3,
    /// Phong shininess exponent.
    pub shininess: i32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: DVec3::ONE,
            kd: DVec3::ZERO,
            ks: DVec3::ZERO,
            kt: DVec3::ZERO,
            kr: DVec3::ZERO,
            shininess: 0,
        }
    }
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ka(mut self, ka: f64) -> Self {
        self.ka = DVec3::splat(ka);
        self
    }

    pub fn with_ka_rgb(mut self, ka: DVec3) -> Self {
        self.ka = ka;
        self
    }

    pub fn with_kd(mut self, kd: f64) -> Self {
        self.kd = DVec3::splat(kd);
        self
    }

    pub fn with_kd_rgb(mut self, kd: DVec3) -> Self {
        self.kd = kd;
        self
    }

    pub fn with_ks(mut self, ks: f64) -> Self {
        self.ks = DVec3::splat(ks);
        self
    }

    pub fn with_ks_rgb(mut self, ks: DVec3) -> Self {
        self.ks = ks;
        self
    }

    pub fn with_kt(mut self, kt: f64) -> Self {
        self.kt = DVec3::splat(kt);
        self
    }

    pub fn with_kt_rgb(mut self, kt: DVec3) -> Self {
        self.kt = kt;
        self
    }

    pub fn with_kr(mut self, kr: f64) -> Self {
        self.kr = DVec3::splat(kr);
        self
    }

    pub fn with_kr_rgb(mut self, kr: DVec3) -> Self {
        self.kr = kr;
        self
    }

    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }
}
