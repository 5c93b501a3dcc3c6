//! # Shader Interface Enumerations
//!
//! Buffer, attribute and texture slots, shader variants, card animation
//! states and quality tiers. Each is declared exactly once here with its raw
//! `i32` value; the shader side uses the same numbers.

use serde::{Deserialize, Serialize};

interface_enum! {
    /// Buffer binding slots.
    pub enum BufferIndex {
        /// Card mesh positions.
        MeshPositions = 0,
        /// Card mesh texcoords/normals/colors.
        MeshGenerics = 1,
        /// [`crate::FrameUniforms`].
        Uniforms = 2,
        /// [`crate::CardUniforms`].
        CardUniforms = 3,
        /// Array of [`crate::ParticleData`].
        ParticleData = 4,
    }
}

interface_enum! {
    /// Vertex attribute locations of the card mesh.
    pub enum VertexAttribute {
        /// `float3` position.
        Position = 0,
        /// `float2` texture coordinate.
        Texcoord = 1,
        /// `float3` normal.
        Normal = 2,
        /// `float4` vertex color.
        Color = 3,
    }
}

interface_enum! {
    /// Texture binding slots.
    pub enum TextureIndex {
        /// Generic color texture.
        Color = 0,
        /// Card face artwork.
        CardFace = 1,
        /// Card back artwork.
        CardBack = 2,
        /// Normal map.
        Normal = 3,
        /// Particle sprite.
        Particle = 4,
    }
}

interface_enum! {
    /// Shader program variants the backend may bind.
    pub enum ShaderType {
        /// Plain textured quad.
        Basic = 0,
        /// Card at rest.
        Card = 1,
        /// Card with selection highlight and edge glow.
        CardHighlight = 2,
        /// Card mid-flip.
        CardFlip = 3,
        /// Particle sprites.
        Particle = 4,
        /// Card with the traditional pattern overlay.
        RomanianPattern = 5,
    }
}

interface_enum! {
    /// Per-card animation state.
    pub enum CardAnimationState {
        /// At rest.
        Idle = 0,
        /// Picked by the player, highlight ramping up.
        Selected = 1,
        /// Turning over.
        Flipping = 2,
        /// Lifted above the table (e.g. won trick).
        Floating = 3,
        /// Round won, glow pulse and particle burst.
        Celebrating = 4,
    }
}

interface_enum! {
    /// Render quality tier.
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum RenderQuality {
        /// Basic shaders, minimal effects.
        Low = 0,
        /// Standard card effects.
        Medium = 1,
        /// Full effects with particles.
        High = 2,
        /// Maximum visual quality.
        Ultra = 3,
    }
}

impl Default for CardAnimationState {
    fn default() -> Self {
        Self::Idle
    }
}

impl Default for RenderQuality {
    fn default() -> Self {
        Self::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values_match_shader_header() {
        assert_eq!(BufferIndex::ParticleData.as_raw(), 4);
        assert_eq!(VertexAttribute::Color.as_raw(), 3);
        assert_eq!(TextureIndex::CardBack.as_raw(), 2);
        assert_eq!(ShaderType::RomanianPattern.as_raw(), 5);
        assert_eq!(CardAnimationState::Celebrating.as_raw(), 4);
        assert_eq!(RenderQuality::Ultra.as_raw(), 3);
    }

    #[test]
    fn test_from_raw_rejects_unknown() {
        for state in CardAnimationState::ALL {
            assert_eq!(CardAnimationState::from_raw(state.as_raw()), Some(*state));
        }
        assert_eq!(CardAnimationState::from_raw(5), None);
        assert_eq!(RenderQuality::from_raw(-1), None);
    }

    #[test]
    fn test_quality_ordering() {
        assert!(RenderQuality::Low < RenderQuality::Medium);
        assert!(RenderQuality::High < RenderQuality::Ultra);
        assert_eq!(RenderQuality::ALL.len(), 4);
    }
}
