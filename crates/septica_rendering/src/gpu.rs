//! # wgpu Descriptors
//!
//! Buffer and vertex layout descriptors for backends built on `wgpu`.
//! Binding slots and attribute locations come from
//! [`septica_shared::BufferIndex`] and [`septica_shared::VertexAttribute`],
//! so WGSL shaders and host code agree on one numbering.
//!
//! Mesh data is split in two streams:
//! - `MeshPositions`: `float3` position, 12 bytes per vertex
//! - `MeshGenerics`: `float2` texcoord, `float3` normal, `float4` color,
//!   36 bytes per vertex

use septica_shared::{BufferIndex, CardUniforms, FrameUniforms, ParticleData, VertexAttribute};

/// Bytes per vertex in the positions stream.
pub const POSITION_STRIDE: wgpu::BufferAddress = 12;

/// Bytes per vertex in the generics stream.
pub const GENERICS_STRIDE: wgpu::BufferAddress = 36;

const fn location(attribute: VertexAttribute) -> u32 {
    attribute.as_raw() as u32
}

const POSITION_ATTRIBS: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: 0,
    shader_location: location(VertexAttribute::Position),
}];

const GENERICS_ATTRIBS: [wgpu::VertexAttribute; 3] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: location(VertexAttribute::Texcoord),
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 8,
        shader_location: location(VertexAttribute::Normal),
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 20,
        shader_location: location(VertexAttribute::Color),
    },
];

/// Layout of the `MeshPositions` vertex stream.
#[must_use]
pub fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: POSITION_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRIBS,
    }
}

/// Layout of the `MeshGenerics` vertex stream.
#[must_use]
pub fn generics_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: GENERICS_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &GENERICS_ATTRIBS,
    }
}

/// Both mesh streams, in `BufferIndex` order.
#[must_use]
pub fn mesh_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [position_layout(), generics_layout()]
}

/// Usage flags for the buffer bound at `index`.
#[must_use]
pub fn buffer_usage(index: BufferIndex) -> wgpu::BufferUsages {
    match index {
        BufferIndex::MeshPositions | BufferIndex::MeshGenerics => {
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST
        }
        BufferIndex::Uniforms => wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        BufferIndex::CardUniforms | BufferIndex::ParticleData => {
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST
        }
    }
}

/// Size in bytes of the buffer bound at `index`, holding `count` records
/// (vertices for mesh streams, ignored for `Uniforms`).
///
/// Never zero: an empty frame still binds one record.
#[must_use]
pub fn buffer_size(index: BufferIndex, count: usize) -> wgpu::BufferAddress {
    let count = count.max(1) as wgpu::BufferAddress;
    match index {
        BufferIndex::MeshPositions => POSITION_STRIDE * count,
        BufferIndex::MeshGenerics => GENERICS_STRIDE * count,
        BufferIndex::Uniforms => FrameUniforms::SIZE as wgpu::BufferAddress,
        BufferIndex::CardUniforms => CardUniforms::SIZE as wgpu::BufferAddress * count,
        BufferIndex::ParticleData => ParticleData::SIZE as wgpu::BufferAddress * count,
    }
}

/// Binding slot of the buffer at `index`.
#[inline]
#[must_use]
pub const fn binding(index: BufferIndex) -> u32 {
    index.as_raw() as u32
}
