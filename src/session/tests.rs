use super::*;

const TEMPLATE: &str = r#"{
    "schemaVersion": "1.0",
    "scope": "TECNICA",
    "title": "Contenido de humedad",
    "nodes": [
        { "type": "procedure", "key": "pasos", "label": "Pasos",
          "steps": [{ "label": "Secado", "text": "Secar a 105 °C hasta masa constante" }] },
        { "type": "group", "key": "pesadas", "label": "Pesadas", "children": [
            { "type": "input", "key": "tara", "label": "Tara", "valueType": "number", "unit": "g", "required": true, "default": 0 },
            { "type": "input", "key": "humedo", "label": "Masa húmeda", "valueType": "number", "unit": "g", "required": true },
            { "type": "input", "key": "seco", "label": "Masa seca", "valueType": "number", "unit": "g", "required": true }
        ]},
        { "type": "calc", "key": "agua", "label": "Agua", "valueType": "number", "unit": "g",
          "expr": { "lang": "expr", "value": "humedo - seco" } },
        { "type": "calc", "key": "humedad", "label": "Humedad", "valueType": "number", "unit": "%",
          "expr": { "lang": "expr", "value": "round(agua / (seco - tara) * 100, 1)" } },
        { "type": "input", "key": "observaciones", "label": "Observaciones", "valueType": "string" }
    ]
}"#;

fn template() -> Template {
    Template::from_json_str(TEMPLATE).unwrap()
}

fn saved(pairs: &[(&str, TemplateValue)]) -> TemplateValues {
    pairs.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
}

#[test]
fn open_merges_defaults_and_computes() {
    let session = Session::open(
        template(),
        &saved(&[("humedo", 120.0.into()), ("seco", 100.0.into())]),
        &EngineConfig::default(),
    )
    .unwrap();

    assert_eq!(session.inputs().get("tara"), Some(&TemplateValue::Number(0.0)));
    assert_eq!(session.derived().get("agua"), Some(&TemplateValue::Number(20.0)));
    assert_eq!(session.derived().get("humedad"), Some(&TemplateValue::Number(20.0)));
    assert!(session.validation().is_valid);
    assert_eq!(session.resolution().passes, 3);
}

#[test]
fn edits_recompute_everything() {
    let mut session = Session::open(template(), &TemplateValues::new(), &EngineConfig::default()).unwrap();
    assert!(session.derived().is_empty());
    assert!(!session.validation().is_valid);
    assert_eq!(session.validation().errors.len(), 2);

    session.set_value("humedo", "55".into()).unwrap();
    session.set_value("seco", 50.0.into()).unwrap();
    session.set_value("tara", 10.0.into()).unwrap();
    assert_eq!(session.derived().get("agua"), Some(&TemplateValue::Number(5.0)));
    assert_eq!(session.derived().get("humedad"), Some(&TemplateValue::Number(12.5)));
    assert!(session.validation().is_valid);

    session.clear_value("seco").unwrap();
    assert!(session.derived().is_empty());
    assert_eq!(
        session.validation().errors.get("seco").map(String::as_str),
        Some("Masa seca es obligatorio")
    );
}

#[test]
fn only_inputs_can_be_edited() {
    let mut session = Session::open(template(), &TemplateValues::new(), &EngineConfig::default()).unwrap();
    for key in ["agua", "pesadas", "pasos", "nada"] {
        assert_eq!(
            session.set_value(key, 1.0.into()),
            Err(SessionError::NotAnInput { key: key.to_string() })
        );
    }
}

#[test]
fn save_payload_excludes_calcs_and_stray_keys() {
    let mut session = Session::open(
        template(),
        &saved(&[("humedo", 120.0.into()), ("agua", 99.0.into()), ("viejo", "x".into())]),
        &EngineConfig::default(),
    )
    .unwrap();

    assert_eq!(session.save_payload(), Err(SessionError::Invalid { count: 1 }));

    session.set_value("seco", 100.0.into()).unwrap();
    let payload = session.save_payload().unwrap();
    assert_eq!(
        payload,
        saved(&[("tara", 0.0.into()), ("humedo", 120.0.into()), ("seco", 100.0.into())])
    );
}

#[test]
fn display_values() {
    let mut session = Session::open(template(), &TemplateValues::new(), &EngineConfig::default()).unwrap();
    assert_eq!(session.display_value("agua"), BLANK);
    assert_eq!(session.display_value("observaciones"), BLANK);
    assert_eq!(session.display_value("tara"), "0 g");

    session.set_value("humedo", 12.5.into()).unwrap();
    session.set_value("seco", 10.0.into()).unwrap();
    session.set_value("observaciones", "sin novedad".into()).unwrap();
    assert_eq!(session.display_value("agua"), "2.5 g");
    assert_eq!(session.display_value("humedad"), "25 %");
    assert_eq!(session.display_value("observaciones"), "sin novedad");
    assert_eq!(session.display_value("pasos"), BLANK);
}

#[test]
fn pass_budget_comes_from_config() {
    let config = EngineConfig {
        max_calc_passes: 1,
        ..EngineConfig::default()
    };
    let session = Session::open(
        template(),
        &saved(&[("humedo", 120.0.into()), ("seco", 100.0.into())]),
        &config,
    )
    .unwrap();
    assert_eq!(session.derived().get("agua"), Some(&TemplateValue::Number(20.0)));
    assert_eq!(session.resolution().unresolved, vec!["humedad"]);
}

#[test]
fn strict_mode_rejects_broken_calcs() {
    let broken = TEMPLATE.replace("humedo - seco", "humedo - ");
    let template = Template::from_json_str(&broken).unwrap();

    let lenient = Session::open(template.clone(), &TemplateValues::new(), &EngineConfig::default());
    assert!(lenient.is_ok());

    let config = EngineConfig {
        strict_expressions: true,
        ..EngineConfig::default()
    };
    let strict = Session::open(template, &TemplateValues::new(), &config);
    assert!(matches!(strict, Err(TemplateError::BadCalcExpression { key, .. }) if key == "agua"));
}
