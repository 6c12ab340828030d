use gridchain::{
    CellProbe, Chain, ChainFingerprint, ExactCoordinate, ExtentPolicy, Level, LevelStats, Rgb8,
};

#[derive(Debug, serde::Serialize)]
pub(crate) struct ChainReport {
    mode: &'static str,
    precision: u32,
    extent: ExtentPolicy,
    fingerprint: ChainFingerprint,
    levels: Vec<LevelReport>,
}

#[derive(Debug, serde::Serialize)]
struct LevelReport {
    index: usize,
    resolution: Vec<u32>,
    cell_size: Vec<ExactCoordinate>,
    stats: LevelStats,
    /// Top row first; a note level is a single row.
    rows: Vec<Vec<Rgb8>>,
}

impl ChainReport {
    pub(crate) fn new<const N: usize>(mode: &'static str, chain: &Chain<N>) -> Self {
        Self {
            mode,
            precision: chain.opts().precision.digits(),
            extent: chain.opts().extent,
            fingerprint: chain.fingerprint(),
            levels: chain.levels().iter().map(LevelReport::new).collect(),
        }
    }
}

impl LevelReport {
    fn new<const N: usize>(level: &Level<N>) -> Self {
        let width = level.resolution[0] as usize;
        Self {
            index: level.index,
            resolution: level.resolution.to_vec(),
            cell_size: level.cell_size.to_vec(),
            stats: level.stats,
            rows: level
                .grid
                .cells()
                .chunks(width)
                .map(<[Rgb8]>::to_vec)
                .collect(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct ProbeReport {
    pub(crate) level: usize,
    pub(crate) resolution: Vec<u32>,
    pub(crate) cells: Vec<CellProbe>,
}
