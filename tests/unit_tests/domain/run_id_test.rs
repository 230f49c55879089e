use subweave::domain::RunId;

#[test]
fn given_two_new_run_ids_when_comparing_then_they_differ() {
    assert_ne!(RunId::new(), RunId::new());
}

#[test]
fn given_run_id_when_displayed_then_it_is_the_hyphenated_uuid() {
    let uuid = uuid::Uuid::new_v4();
    let run_id = RunId::from_uuid(uuid);

    assert_eq!(run_id.to_string(), uuid.to_string());
    assert_eq!(run_id.as_uuid(), uuid);
}
