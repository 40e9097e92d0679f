use valkind::prelude::*;

struct SlugKind;

impl Kind for SlugKind {
    fn name() -> &'static str {
        "Slug"
    }

    fn transform(datum: Datum) -> Result<Datum, TypeMismatch> {
        Ok(Datum::from(datum.into_string()?.trim().to_lowercase().replace(' ', "-")))
    }

    fn validate(datum: &Datum) -> bool {
        datum.as_str().is_some_and(|text| {
            !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
    }
}

type Slug = ValueObject<SlugKind>;

#[shortcuts]
impl SlugKind {
    #[shortcut]
    fn get_word_count(slug: &Slug) -> usize {
        slug.as_str().map_or(0, |text| text.split('-').count())
    }

    fn unrelated() -> u8 {
        7
    }
}

fn main() {
    assert_eq!(SlugKind::get_word_count_from(" Hello Rust World ").unwrap(), 3);
    assert_eq!(SlugKind::try_get_word_count_from("no_underscores"), Ok(None));
    assert!(SlugKind::get_word_count_from(5).unwrap_err().is_invalid());
    assert_eq!(SlugKind::unrelated(), 7);
}
