//! Seeded 2-D gradient noise

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const GRAD2: [(f32, f32); 12] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

/// Permutation table shared by both noise functions.
#[derive(Debug, Clone)]
pub struct NoiseTable {
    seed: i32,
    perm: [u8; 512],
}

impl NoiseTable {
    pub fn new(seed: i32) -> Self {
        let mut base: Vec<u8> = (0..=255).collect();
        let mut rng = StdRng::seed_from_u64(u64::from(seed as u32));
        base.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = base[i & 255];
        }
        Self { seed, perm }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    fn hash(&self, i: i32) -> usize {
        self.perm[(i & 255) as usize] as usize
    }

    /// Improved Perlin noise, roughly in [-1, 1]. Zero on lattice points.
    pub fn perlin(&self, x: f32, y: f32) -> f32 {
        let (xf0, yf0) = (x.floor(), y.floor());
        let (xi, yi) = (lattice(xf0), lattice(yf0));
        let (xf, yf) = (x - xf0, y - yf0);
        let (u, v) = (fade(xf), fade(yf));

        let a = self.hash(xi);
        let b = self.hash(xi + 1);
        let aa = self.perm[(a + (yi & 255) as usize) & 511];
        let ab = self.perm[(a + ((yi + 1) & 255) as usize) & 511];
        let ba = self.perm[(b + (yi & 255) as usize) & 511];
        let bb = self.perm[(b + ((yi + 1) & 255) as usize) & 511];

        let x1 = lerp(perlin_grad(aa, xf, yf), perlin_grad(ba, xf - 1.0, yf), u);
        let x2 = lerp(
            perlin_grad(ab, xf, yf - 1.0),
            perlin_grad(bb, xf - 1.0, yf - 1.0),
            u,
        );
        lerp(x1, x2, v)
    }

    /// 2-D simplex noise in [-1, 1].
    pub fn simplex(&self, x: f32, y: f32) -> f32 {
        let sqrt3 = 3.0_f32.sqrt();
        let f2 = 0.5 * (sqrt3 - 1.0);
        let g2 = (3.0 - sqrt3) / 6.0;

        let s = (x + y) * f2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * g2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };
        let x1 = x0 - i1 as f32 + g2;
        let y1 = y0 - j1 as f32 + g2;
        let x2 = x0 - 1.0 + 2.0 * g2;
        let y2 = y0 - 1.0 + 2.0 * g2;

        let (ii, jj) = (lattice(i), lattice(j));
        let gi0 = self.hash(ii + self.hash(jj) as i32) % 12;
        let gi1 = self.hash(ii + i1 + self.hash(jj + j1) as i32) % 12;
        let gi2 = self.hash(ii + 1 + self.hash(jj + 1) as i32) % 12;

        70.0 * (corner(gi0, x0, y0) + corner(gi1, x1, y1) + corner(gi2, x2, y2))
    }
}

/// Lattice coordinate reduced to the permutation period, so neighbour offsets
/// cannot overflow.
fn lattice(v: f32) -> i32 {
    (v.rem_euclid(256.0) as i32) & 255
}

fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn perlin_grad(hash: u8, x: f32, y: f32) -> f32 {
    match hash & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}

fn corner(gradient: usize, x: f32, y: f32) -> f32 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let (gx, gy) = GRAD2[gradient];
        let t2 = t * t;
        t2 * t2 * (gx * x + gy * y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(table: &NoiseTable) -> Vec<f32> {
        (0..64)
            .map(|i| {
                let x = i as f32 * 0.37 - 5.0;
                let y = i as f32 * 0.21 + 1.3;
                table.perlin(x, y) + table.simplex(x, y)
            })
            .collect()
    }

    #[test]
    fn test_same_seed_same_noise() {
        assert_eq!(samples(&NoiseTable::new(7)), samples(&NoiseTable::new(7)));
    }

    #[test]
    fn test_different_seed_different_noise() {
        assert_ne!(samples(&NoiseTable::new(7)), samples(&NoiseTable::new(8)));
    }

    #[test]
    fn test_perlin_zero_on_lattice() {
        let table = NoiseTable::new(3);
        assert_eq!(table.perlin(2.0, -4.0), 0.0);
        assert_eq!(table.perlin(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_range() {
        let table = NoiseTable::new(-12);
        for i in 0..400 {
            let x = (i % 20) as f32 * 0.53 - 3.0;
            let y = (i / 20) as f32 * 0.47 - 4.0;
            let p = table.perlin(x, y);
            let s = table.simplex(x, y);
            assert!((-1.01..=1.01).contains(&p), "perlin {p} at ({x}, {y})");
            assert!((-1.01..=1.01).contains(&s), "simplex {s} at ({x}, {y})");
        }
    }

    #[test]
    fn test_large_coordinates() {
        let table = NoiseTable::new(5);
        for &(x, y) in &[(3e9, 0.0), (0.0, -3e9), (f32::MAX, f32::MIN), (-2.5e12, 7.25)] {
            let p = table.perlin(x, y);
            let s = table.simplex(x, y);
            assert!(p.is_finite() && (-1.01..=1.01).contains(&p), "perlin {p} at ({x}, {y})");
            assert!(s.is_finite() && (-1.01..=1.01).contains(&s), "simplex {s} at ({x}, {y})");
        }
    }

    #[test]
    fn test_lattice_wraps_period() {
        let table = NoiseTable::new(9);
        assert_eq!(table.perlin(0.25, 0.5), table.perlin(256.25, 0.5));
        assert_eq!(lattice(-1.0), 255);
        assert_eq!(lattice(257.0), 1);
        assert_eq!(lattice(3e9), 0);
    }
}
