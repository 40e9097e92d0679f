use valkind::kinds::{Email, EmailKind};

fn main() {
    let domain: String = EmailKind::get_domain_from("ann@example.org").unwrap();
    assert_eq!(domain, "example.org");

    let email = Email::from("bob@example.net").unwrap();
    assert_eq!(EmailKind::get_local_part(&email), "bob");
    assert_eq!(EmailKind::try_get_local_part_from(email), Ok(Some("bob".to_owned())));
    assert_eq!(EmailKind::try_get_domain_from(Option::<i64>::None), Ok(None));
}
