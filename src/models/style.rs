use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A storyboard preset: look, soundscape, and narration direction applied
/// to every cut generated under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresetStyle {
    pub id: String,
    pub label: String,
    pub description: String,
    pub grading: String,
    pub bgm: String,
    pub sfx: Vec<String>,
    pub vo_tone: String,
    pub sort_order: i32,
    pub active: bool,
    pub prompt: Option<String>,
    pub reference_image_url: Option<String>,
}

/// Built-in catalog served whenever the persisted collection is empty or
/// unreachable, so the styles page never renders blank. Either the live set
/// or this entire list is returned, never a merge.
pub fn fallback_styles() -> Vec<PresetStyle> {
    vec![
        PresetStyle {
            id: "cinematic-noir".to_string(),
            label: "Cinematic Noir".to_string(),
            description: "High-contrast monochrome frames with hard shadows and rain-slick streets".to_string(),
            grading: "desaturated, crushed blacks, silver highlights".to_string(),
            bgm: "slow brushed-drum jazz with upright bass".to_string(),
            sfx: vec![
                "distant thunder".to_string(),
                "rain on glass".to_string(),
                "match strike".to_string(),
            ],
            vo_tone: "low, unhurried, world-weary".to_string(),
            sort_order: 1,
            active: true,
            prompt: Some("1940s film noir still, chiaroscuro lighting, 35mm grain".to_string()),
            reference_image_url: None,
        },
        PresetStyle {
            id: "pastel-dream".to_string(),
            label: "Pastel Dream".to_string(),
            description: "Soft-focus scenes washed in powdery pinks and mint greens".to_string(),
            grading: "lifted shadows, warm pastel palette, gentle bloom".to_string(),
            bgm: "music-box waltz over ambient pads".to_string(),
            sfx: vec!["wind chimes".to_string(), "page turn".to_string()],
            vo_tone: "breathy, wondering, close-mic".to_string(),
            sort_order: 2,
            active: true,
            prompt: Some("dreamy pastel illustration, soft gradients, airbrush texture".to_string()),
            reference_image_url: None,
        },
        PresetStyle {
            id: "neon-arcade".to_string(),
            label: "Neon Arcade".to_string(),
            description: "Synthwave cityscapes, chrome type, and CRT scanline shimmer".to_string(),
            grading: "magenta-cyan split tone, high saturation, glow".to_string(),
            bgm: "driving 80s synth arpeggios".to_string(),
            sfx: vec![
                "arcade cabinet bleeps".to_string(),
                "vhs rewind".to_string(),
                "electric hum".to_string(),
            ],
            vo_tone: "energetic, announcer-style".to_string(),
            sort_order: 3,
            active: true,
            prompt: Some("retrowave poster art, neon grid horizon, chrome lettering".to_string()),
            reference_image_url: None,
        },
        PresetStyle {
            id: "paper-collage".to_string(),
            label: "Paper Collage".to_string(),
            description: "Cut-paper layers with torn edges and visible glue-stick texture".to_string(),
            grading: "flat natural light, craft-paper warmth".to_string(),
            bgm: "playful ukulele and glockenspiel".to_string(),
            sfx: vec!["scissors snip".to_string(), "paper rustle".to_string()],
            vo_tone: "bright, storybook narrator".to_string(),
            sort_order: 4,
            active: true,
            prompt: Some("handmade paper collage, layered cutouts, stop-motion feel".to_string()),
            reference_image_url: None,
        },
        PresetStyle {
            id: "documentary-daylight".to_string(),
            label: "Documentary Daylight".to_string(),
            description: "Handheld naturalism with honest color and found locations".to_string(),
            grading: "neutral, true-to-life, slight handheld vignette".to_string(),
            bgm: "sparse acoustic guitar beds".to_string(),
            sfx: vec!["room tone".to_string(), "street ambience".to_string()],
            vo_tone: "conversational, measured, sincere".to_string(),
            sort_order: 5,
            active: true,
            prompt: None,
            reference_image_url: None,
        },
        PresetStyle {
            id: "ink-wash".to_string(),
            label: "Ink Wash".to_string(),
            description: "Sumi-e brushwork, generous negative space, bleeding gradients".to_string(),
            grading: "paper white, carbon black, single vermilion accent".to_string(),
            bgm: "solo shakuhachi with long silences".to_string(),
            sfx: vec!["brush on paper".to_string(), "water drip".to_string()],
            vo_tone: "calm, spare, contemplative".to_string(),
            sort_order: 6,
            active: true,
            prompt: Some("traditional ink wash painting, minimal strokes, rice paper texture".to_string()),
            reference_image_url: None,
        },
    ]
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StylesResponse {
    pub styles: Vec<PresetStyle>,
}
