//! Forensics prompt construction.

use voxcheck_acoustic::AcousticFeatures;

/// Strict output contract appended to every prompt.
const OUTPUT_SCHEMA: &str = r#"Return the result strictly in JSON format matching the following schema:
{
    "is_ai_generated": boolean,
    "confidence_score": float (0.0 to 1.0),
    "explanation": "string (Max 15 words, crisp and direct reason)"
}"#;

const REASONING_RUBRIC: &str = r#"Step-by-step reasoning process:
1. **Prosody & Rhythm**: Natural human speech has irregular pauses, breaths, filler words (um/uh). AI often uniform. Flag AI only if *highly* robotic (no breaths, perfect regularity).
2. **Pitch & Timbre**: Humans show micro-variations, breathiness. AI overly smooth. Count as AI evidence *only* if metallic/unnatural + no organic wobble.
3. **Articulation**: Humans have subtle slurs, regional accents. AI crisp but sometimes blends phonemes oddly. Neutral unless clear synthesis error.
4. **Timing**: Humans vary speed with emphasis. AI predictable. Flag only extreme uniformity.
5. **Spectral Artifacts**: Check for synthesis clues (flat regions, repeating patterns). Human audio often has natural noise floor. This is strongest AI indicator.
6. **Human Variability Check**: Presence of breaths, hesitations, background noise, or emotional shifts = strong HUMAN evidence.
7. **Decision Rule**: Count AI indicators (must be 3+ strong ones). If <3 or any ambiguity, classify HUMAN. Bias toward HUMAN - real humans are messy."#;

/// Prompt for the multimodal variant: instructions only, the clip itself
/// travels alongside as an inline audio part.
pub fn audio_prompt() -> String {
    format!(
        "You are an expert audio forensics analyst.\n\
         Analyze the following audio clip to determine if the voice is AI-generated (Synthetic) or Human.\n\n\
         {}\n\n\
         Based on this analysis, provide a classification.\n\n\
         {}",
        REASONING_RUBRIC, OUTPUT_SCHEMA
    )
}

/// Prompt for the feature variant: the clip never leaves the server, only
/// these measurements do.
pub fn feature_prompt(features: &AcousticFeatures) -> String {
    format!(
        "You are an expert audio forensics analyst.\n\
         Determine from the acoustic measurements below whether the voice in a clip is AI-generated (Synthetic) or Human.\n\
         No audio is attached; judge only from the measurements.\n\n\
         {}\n\n\
         {}\n\n\
         Based on this analysis, provide a classification.\n\n\
         {}",
        feature_report(features),
        REASONING_RUBRIC,
        OUTPUT_SCHEMA
    )
}

/// Renders the measurements with an interpretive hint per line.
fn feature_report(features: &AcousticFeatures) -> String {
    format!(
        "Acoustic measurements extracted from the clip:\n\
         - duration: {} s\n\
         - pitch_mean_hz: {} (typical adult speech sits around 85-255 Hz; far outside that range is suspicious)\n\
         - pitch_variation_hz: {} (humans show natural pitch wobble; near-zero variation suggests synthesis)\n\
         - zero_crossing_rate: {} (reflects noisiness and fricatives; unnaturally low values suggest over-smoothed audio)\n\
         - spectral_centroid_hz: {} (spectral brightness; synthetic voices often hold it unnaturally steady)\n\
         - spectral_flatness: {} (0 = tonal, 1 = noise-like; flat synthetic regions are a strong AI indicator)\n\
         - silence_ratio: {} (humans pause and breathe; almost no silence can mean wall-to-wall generated speech)",
        features.duration_secs,
        features.pitch_mean_hz,
        features.pitch_variation_hz,
        features.zero_crossing_rate,
        features.spectral_centroid_hz,
        features.spectral_flatness,
        features.silence_ratio,
    )
}
