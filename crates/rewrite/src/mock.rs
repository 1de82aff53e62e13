//! Canned Egyptian-Arabic copy used when no provider can answer.

use atelier_core::FieldKind;
use rand::Rng;

const TITLE_MOCKS: &[&str] = &[
    "إكسير الجمال المغربي",
    "زيت الأرغان الملكي",
    "سحر الطبيعة",
    "نضارة فورية وتغذية عميقة",
];

const DESCRIPTION_MOCKS: &[&str] = &[
    "منتج طبيعي ١٠٠٪ بيوفر لك عناية متكاملة. ترطيب عميق وحماية طويلة المدى لبشرتك وشعرك.",
    "جربي سحر المكونات الطبيعية اللي بتغذي بشرتك من الأعماق. نعومة ولمعان ملهوش مثيل.",
    "اختيارك الأمثل لروتين يومي صحي. تركيبة غنية بالفيتامينات والمعادن اللي محتاجاها بشرتك.",
];

const INGREDIENTS_MOCKS: &[&str] = &[
    "زيت أرغان نقي، فيتامين هـ، أحماض دهنية أساسية",
    "خلاصة الصبار، زيت الجوجوبا، زبدة الشيا",
    "زيت اللوز الحلو، مستخلص الورد، ماء مقطر",
];

const HOW_TO_USE_MOCKS: &[&str] = &[
    "1. حطي كمية صغيرة على بشرة نظيفة.\n2. دلكي بلطف بحركات دائرية.\n3. سيبيه يمتص تماماً.",
    "1. وزعي المنتج بالتساوي على الشعر المبلل.\n2. ركزي على الأطراف.\n3. مش محتاجة تغسليه.",
    "استخدميه مرة الصبح ومرة بالليل لنتائج أفضل.",
];

const GENERIC_MOCK: &str = "منتج رائع ومميز";

/// Benefit titles returned when the benefit generator has no provider answer.
pub const MOCK_BENEFITS: [&str; 4] = [
    "ترطيب عميق",
    "مكونات طبيعية 100%",
    "خالي من المواد الضارة",
    "نتائج سريعة",
];

/// Pick a canned rewrite for the field. Fields without a dedicated mock set
/// (including single benefits and unknown fields) get the generic line.
pub fn mock_rewrite(field: Option<FieldKind>) -> String {
    let options: &[&str] = match field {
        Some(FieldKind::Title) => TITLE_MOCKS,
        Some(FieldKind::Description) => DESCRIPTION_MOCKS,
        Some(FieldKind::Ingredients) => INGREDIENTS_MOCKS,
        Some(FieldKind::HowToUse) => HOW_TO_USE_MOCKS,
        Some(FieldKind::Benefit) | None => return GENERIC_MOCK.to_string(),
    };
    let index = rand::thread_rng().gen_range(0..options.len());
    options[index].to_string()
}

/// Canned benefit set for the four-benefit generator.
pub fn mock_benefits() -> Vec<String> {
    MOCK_BENEFITS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fields_draw_from_their_set() {
        for _ in 0..20 {
            let title = mock_rewrite(Some(FieldKind::Title));
            assert!(TITLE_MOCKS.contains(&title.as_str()));
        }
    }

    #[test]
    fn unknown_and_benefit_fields_get_generic_copy() {
        assert_eq!(mock_rewrite(None), GENERIC_MOCK);
        assert_eq!(mock_rewrite(Some(FieldKind::Benefit)), GENERIC_MOCK);
    }

    #[test]
    fn mock_benefits_has_four_entries() {
        assert_eq!(mock_benefits().len(), 4);
    }
}
