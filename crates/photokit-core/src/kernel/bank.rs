//! Fixed 3x3 kernels: smoothing, sharpening, edge, shift and emboss
//! operators, plus the directional edge-detector banks.

use serde::{Deserialize, Serialize};

use super::{Kernel, Response};

type Matrix = [[f32; 3]; 3];

/// Laplacian-style edge enhancement.
pub const EDGE_ENHANCE: Matrix = [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]];

/// Kirsch compass kernels, 0 through 315 degrees in 45 degree steps.
pub const KIRSCH: [Matrix; 8] = [
    [[5.0, 5.0, 5.0], [-3.0, 0.0, -3.0], [-3.0, -3.0, -3.0]],
    [[-3.0, 5.0, 5.0], [-3.0, 0.0, 5.0], [-3.0, -3.0, -3.0]],
    [[-3.0, -3.0, 5.0], [-3.0, 0.0, 5.0], [-3.0, -3.0, 5.0]],
    [[-3.0, -3.0, -3.0], [-3.0, 0.0, 5.0], [-3.0, 5.0, 5.0]],
    [[-3.0, -3.0, -3.0], [-3.0, 0.0, -3.0], [5.0, 5.0, 5.0]],
    [[-3.0, -3.0, -3.0], [5.0, 0.0, -3.0], [5.0, 5.0, -3.0]],
    [[5.0, -3.0, -3.0], [5.0, 0.0, -3.0], [5.0, -3.0, -3.0]],
    [[5.0, 5.0, -3.0], [5.0, 0.0, -3.0], [-3.0, -3.0, -3.0]],
];

/// Prewitt kernels: vertical edges, then horizontal edges.
pub const PREWITT: [Matrix; 2] = [
    [[1.0, 0.0, -1.0], [1.0, 0.0, -1.0], [1.0, 0.0, -1.0]],
    [[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
];

/// Sobel kernels: horizontal gradient, then vertical gradient.
pub const SOBEL: [Matrix; 2] = [
    [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]],
    [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]],
];

const BOX: Matrix = [[1.0; 3]; 3];
const WEIGHTED_BOX: Matrix = [[1.0, 1.0, 1.0], [1.0, 2.0, 1.0], [1.0, 1.0, 1.0]];
const PYRAMIDAL: Matrix = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];

const SHARPEN_STRONG: Matrix = [[-1.0, -1.0, -1.0], [-1.0, 9.0, -1.0], [-1.0, -1.0, -1.0]];
const SHARPEN_CROSS: Matrix = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];
const SHARPEN_DIAGONAL: Matrix = [[1.0, -2.0, 1.0], [-2.0, 5.0, -2.0], [1.0, -2.0, 1.0]];

const SHIFT_VERTICAL: Matrix = [[0.0, 0.0, 0.0], [-1.0, 1.0, 0.0], [0.0, 0.0, 0.0]];
const SHIFT_HORIZONTAL: Matrix = [[0.0, -1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]];
const SHIFT_DIAGONAL: Matrix = [[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]];
const SHIFT_ANTI_DIAGONAL: Matrix = [[0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]];

const EMBOSS_IN: Matrix = [[0.0, 1.0, 0.0], [-1.0, 0.0, 1.0], [0.0, -1.0, 0.0]];
const EMBOSS_OUT: Matrix = [[0.0, -1.0, 0.0], [1.0, 0.0, -1.0], [0.0, 1.0, 0.0]];

/// Mid-gray offset added to emboss responses.
const EMBOSS_BIAS: f32 = 128.0;

/// Low-pass (smoothing) kernels, normalized by their total weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LowPass {
    /// Plain 3x3 mean (/9).
    Box,
    /// Mean with a doubled center (/10).
    WeightedBox,
    /// Binomial pyramid (/16).
    Pyramidal,
}

impl LowPass {
    pub fn matrix(self) -> Matrix {
        match self {
            LowPass::Box => BOX,
            LowPass::WeightedBox => WEIGHTED_BOX,
            LowPass::Pyramidal => PYRAMIDAL,
        }
    }

    pub fn kernel(self) -> Kernel {
        Kernel::from_3x3(&self.matrix())
    }
}

/// High-pass (sharpening) kernels. Each sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighPass {
    Strong,
    Cross,
    Diagonal,
}

impl HighPass {
    pub fn matrix(self) -> Matrix {
        match self {
            HighPass::Strong => SHARPEN_STRONG,
            HighPass::Cross => SHARPEN_CROSS,
            HighPass::Diagonal => SHARPEN_DIAGONAL,
        }
    }

    pub fn kernel(self) -> Kernel {
        Kernel::from_3x3(&self.matrix())
    }
}

/// Shift-and-difference edge kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    /// Difference with the left neighbor.
    Vertical,
    /// Difference with the neighbor above.
    Horizontal,
    /// Difference with the upper-left neighbor.
    Diagonal,
    /// Difference with the upper-right neighbor.
    AntiDiagonal,
}

impl ShiftDirection {
    pub fn matrix(self) -> Matrix {
        match self {
            ShiftDirection::Vertical => SHIFT_VERTICAL,
            ShiftDirection::Horizontal => SHIFT_HORIZONTAL,
            ShiftDirection::Diagonal => SHIFT_DIAGONAL,
            ShiftDirection::AntiDiagonal => SHIFT_ANTI_DIAGONAL,
        }
    }

    /// Vertical shifts keep only brightening edges; the others use magnitude.
    pub fn kernel(self) -> Kernel {
        let response = match self {
            ShiftDirection::Vertical => Response::Clamp,
            _ => Response::Abs,
        };
        Kernel::from_3x3(&self.matrix()).with_response(response)
    }
}

/// Emboss kernels, lit from opposite sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbossDirection {
    In,
    Out,
}

impl EmbossDirection {
    pub fn matrix(self) -> Matrix {
        match self {
            EmbossDirection::In => EMBOSS_IN,
            EmbossDirection::Out => EMBOSS_OUT,
        }
    }

    pub fn kernel(self) -> Kernel {
        Kernel::from_3x3(&self.matrix()).with_bias(EMBOSS_BIAS)
    }
}

/// Laplacian edge enhancement, magnitude response.
pub fn edge_enhance_kernel() -> Kernel {
    Kernel::from_3x3(&EDGE_ENHANCE).with_response(Response::Abs)
}
