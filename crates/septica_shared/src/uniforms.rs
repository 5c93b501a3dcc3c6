//! # GPU Uniform Records
//!
//! Byte-stable records copied verbatim into GPU-visible memory.
//!
//! The layouts reproduce what a shader sees for the equivalent `simd`
//! types: `float3` occupies 16 bytes, `float2` is 8-byte aligned and every
//! record is padded to a multiple of 16. Padding lanes are explicit fields so
//! that every byte is defined and the records are `Pod`.
//!
//! ```text
//! FrameUniforms  (160 B)  projection | view | time | dt | screen | progress | pad
//! CardUniforms   ( 64 B)  highlight | edge glow | sel | flip | glow | state | size | radius | pad
//! ParticleData   ( 64 B)  position+pad | velocity+pad | color | life | size | rot | spin
//! ```

use bytemuck::{Pod, Zeroable};

use crate::constants::{CARD_CORNER_RADIUS, DEFAULT_GLOW_INTENSITY};
use crate::interface::CardAnimationState;

/// Version of the record layouts below. Bump on any reorder or width change.
pub const LAYOUT_VERSION: u32 = 1;

/// Column-major 4x4 identity.
pub const IDENTITY_MATRIX: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Per-frame uniforms, bound at [`crate::BufferIndex::Uniforms`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Projection matrix (column-major).
    pub projection_matrix: [[f32; 4]; 4],
    /// View matrix (column-major).
    pub view_matrix: [[f32; 4]; 4],
    /// Elapsed animation time in seconds.
    pub time: f32,
    /// Time advanced by this frame in seconds.
    pub delta_time: f32,
    /// Drawable size in pixels.
    pub screen_size: [f32; 2],
    /// Global animation progress, always in [0, 1].
    pub animation_progress: f32,
    /// Tail padding to a 16-byte multiple.
    pub _pad: [f32; 3],
}

impl FrameUniforms {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Creates frame uniforms, clamping the progress into [0, 1].
    #[must_use]
    pub fn new(
        projection_matrix: [[f32; 4]; 4],
        view_matrix: [[f32; 4]; 4],
        time: f32,
        delta_time: f32,
        screen_size: [f32; 2],
        animation_progress: f32,
    ) -> Self {
        Self {
            projection_matrix,
            view_matrix,
            time,
            delta_time,
            screen_size,
            animation_progress: clamp_unit(animation_progress),
            _pad: [0.0; 3],
        }
    }

    /// Raw bytes for upload.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Reads a record back from raw bytes. `None` on a length mismatch.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        bytemuck::try_pod_read_unaligned(bytes).ok()
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new(IDENTITY_MATRIX, IDENTITY_MATRIX, 0.0, 0.0, [0.0, 0.0], 1.0)
    }
}

/// Per-card uniforms, bound at [`crate::BufferIndex::CardUniforms`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CardUniforms {
    /// Selection highlight color (RGBA).
    pub highlight_color: [f32; 4],
    /// Edge glow color (RGBA).
    pub edge_glow_color: [f32; 4],
    /// Selection intensity in [0, 1].
    pub selection_intensity: f32,
    /// Flip angle in radians, 0 = face-down, pi = face-up.
    pub flip_angle: f32,
    /// Glow intensity in [0, 1].
    pub glow_intensity: f32,
    /// Raw [`CardAnimationState`].
    pub animation_state: i32,
    /// Card width and height.
    pub card_size: [f32; 2],
    /// Corner radius.
    pub corner_radius: f32,
    /// Tail padding to a 16-byte multiple.
    pub _pad: f32,
}

impl CardUniforms {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// A face-down idle card at resting glow.
    #[must_use]
    pub fn resting(card_size: [f32; 2]) -> Self {
        Self {
            highlight_color: [0.0; 4],
            edge_glow_color: [0.0; 4],
            selection_intensity: 0.0,
            flip_angle: 0.0,
            glow_intensity: DEFAULT_GLOW_INTENSITY,
            animation_state: CardAnimationState::Idle.as_raw(),
            card_size,
            corner_radius: CARD_CORNER_RADIUS,
            _pad: 0.0,
        }
    }

    /// Decoded animation state, `None` if the raw value is corrupt.
    #[inline]
    #[must_use]
    pub const fn animation_state(&self) -> Option<CardAnimationState> {
        CardAnimationState::from_raw(self.animation_state)
    }

    /// Raw bytes for upload.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Reads a record back from raw bytes. `None` on a length mismatch.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        bytemuck::try_pod_read_unaligned(bytes).ok()
    }
}

/// One particle, an element of the [`crate::BufferIndex::ParticleData`] array.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleData {
    /// World position.
    pub position: [f32; 3],
    /// `float3` padding lane.
    pub _pad0: f32,
    /// Velocity in units per second.
    pub velocity: [f32; 3],
    /// `float3` padding lane.
    pub _pad1: f32,
    /// Color (RGBA).
    pub color: [f32; 4],
    /// Remaining life in seconds. Dead at or below zero.
    pub life: f32,
    /// Sprite size.
    pub size: f32,
    /// Sprite rotation in radians.
    pub rotation: f32,
    /// Rotation speed in radians per second.
    pub rotation_speed: f32,
}

impl ParticleData {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// A dead record, used as padding past the live particles.
    #[must_use]
    pub const fn dead() -> Self {
        Self {
            position: [0.0; 3],
            _pad0: 0.0,
            velocity: [0.0; 3],
            _pad1: 0.0,
            color: [0.0; 4],
            life: 0.0,
            size: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    /// Is this particle alive?
    #[inline]
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
