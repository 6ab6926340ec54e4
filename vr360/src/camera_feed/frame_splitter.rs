use engine::RawTextureData;
use serde::{Deserialize, Serialize};

/// Frames narrower or shorter than this are camera placeholders (most
/// drivers report 16x16 until the first real frame arrives).
pub const MIN_FRAME_DIMENSION: u32 = 32;

const BYTES_PER_PIXEL: usize = 4;

/// Memory order of the rows in a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowOrder {
    /// Row 0 is the visual bottom of the image.
    #[default]
    BottomUp,
    /// Row 0 is the visual top of the image.
    TopDown,
}

/// One of the two lens images in a split frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameHalf {
    Front,
    Rear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutcome {
    /// Both halves were written. `resized` is set when the output buffers
    /// had to be reallocated for new frame dimensions.
    Split { resized: bool },
    TooSmall,
    ShortBuffer { expected: usize, actual: usize },
}

/// Splits a dual-lens frame into its front (visual top) and rear (visual
/// bottom) images.
///
/// The two output textures belong to the splitter and are overwritten on
/// every split; they are only reallocated when the frame size changes.
#[derive(Debug)]
pub struct FrameSplitter {
    row_order: RowOrder,
    front: RawTextureData,
    rear: RawTextureData,
}

impl FrameSplitter {
    pub fn new(row_order: RowOrder) -> Self {
        FrameSplitter {
            row_order,
            front: RawTextureData::empty(),
            rear: RawTextureData::empty(),
        }
    }

    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    pub fn set_row_order(&mut self, row_order: RowOrder) {
        self.row_order = row_order;
    }

    pub fn front(&self) -> &RawTextureData {
        &self.front
    }

    pub fn rear(&self) -> &RawTextureData {
        &self.rear
    }

    pub fn half(&self, half: FrameHalf) -> &RawTextureData {
        match half {
            FrameHalf::Front => &self.front,
            FrameHalf::Rear => &self.rear,
        }
    }

    /// Split a tightly packed RGBA frame.
    ///
    /// With [`RowOrder::BottomUp`] the front image is rows `[H/2, H)` and the
    /// rear image rows `[0, H/2)`; [`RowOrder::TopDown`] swaps them. For odd
    /// heights the upper memory half carries the extra row.
    pub fn split(&mut self, width: u32, height: u32, pixels: &[u8]) -> SplitOutcome {
        if width < MIN_FRAME_DIMENSION || height < MIN_FRAME_DIMENSION {
            return SplitOutcome::TooSmall;
        }

        let stride = width as usize * BYTES_PER_PIXEL;
        let expected = stride * height as usize;
        if pixels.len() < expected {
            return SplitOutcome::ShortBuffer {
                expected,
                actual: pixels.len(),
            };
        }

        let lower_rows = height / 2;
        let upper_rows = height - lower_rows;
        let (lower, upper) = pixels[..expected].split_at(lower_rows as usize * stride);

        let (front_src, front_rows, rear_src, rear_rows) = match self.row_order {
            RowOrder::BottomUp => (upper, upper_rows, lower, lower_rows),
            RowOrder::TopDown => (lower, lower_rows, upper, upper_rows),
        };

        let front_resized = self.front.reshape(width, front_rows);
        let rear_resized = self.rear.reshape(width, rear_rows);
        self.front.bytes.copy_from_slice(front_src);
        self.rear.bytes.copy_from_slice(rear_src);

        SplitOutcome::Split {
            resized: front_resized || rear_resized,
        }
    }
}
