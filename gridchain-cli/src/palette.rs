use gridchain::Rgb8;

const BASE: [u32; 33] = [
    0x009fe3, 0xea5e00, 0xd32b51, 0xb74083, 0x845a9f, 0x3f517d, 0x386982, 0x038cb7, 0x00a0a4,
    0x00a578, 0x2c9d13, 0xc49d0a, 0xffbe0b, 0xfb5607, 0xff006e, 0x8338ec, 0x3a86ff, 0x2a9d8f,
    0xe9c46a, 0xf4a261, 0xe76f51, 0x61e294, 0x7bcdba, 0x9799ca, 0xb47aea, 0x3d5a80, 0xee6c4d,
    0x4b3f72, 0xffc857, 0x119da4, 0x19647e, 0x7c9885, 0xb5b682,
];

const LIGHTEN: f64 = 0.505;

/// `count` colors: each base color followed by a lighter shade of itself, cycling as needed.
pub(crate) fn note_palette(count: usize) -> Vec<Rgb8> {
    BASE.iter()
        .cycle()
        .flat_map(|&rgb| {
            let base = Rgb8::from_u32(rgb);
            [base, base.lerp(Rgb8::WHITE, LIGHTEN)]
        })
        .take(count)
        .collect()
}

/// Default pixel seed: the palette laid out row by row.
pub(crate) fn pixel_palette(width: u32, height: u32) -> Vec<Vec<Rgb8>> {
    let colors = note_palette((width as usize) * (height as usize));
    colors
        .chunks(width.max(1) as usize)
        .map(<[Rgb8]>::to_vec)
        .collect()
}
