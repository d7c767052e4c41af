mod test_utils;

use test_utils::*;

use ulink_client::{
    constants::{MSG_APPLY_SUCCESS, MSG_DELETE_SUCCESS, MSG_SESSION_EXPIRED, MSG_UPDATE_SUCCESS},
    entities::practica::PracticaField,
    use_cases::{
        browse_practicas::BrowseState,
        manage_practicas::ViewMode,
        practica_shell::{ShellContent, ShellMode},
        Banner,
    },
};

#[actix_rt::test]
async fn company_creates_practica_and_lists_it() {
    let app = TestApp::spawn().await;
    app.login_as_company();

    let mut page = app.state.create_practica_page();
    fill_practica(&mut page, "Backend Intern");
    page.submit().await;

    assert_eq!(
        page.banner(),
        Some(&Banner::Success("Práctica creada exitosamente con ID: 1".into()))
    );
    assert!(page.form().is_empty());

    let created = app.requests_to("POST", "/Create-practicas");
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].authorization.as_deref(), Some("Bearer company-token"));
    assert_eq!(created[0].body["Titulo"], "Backend Intern");
    assert_eq!(created[0].body["Id_Empresa"], 7);
    assert_eq!(created[0].body["Fecha_inicio"], "2026-10-20T00:00:00.000Z");

    let mut list = app.state.practica_list_page();
    list.mount().await;
    let rows = list.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].titulo, "Backend Intern");
}

#[actix_rt::test]
async fn invalid_form_never_reaches_the_backend() {
    let app = TestApp::spawn().await;
    app.login_as_company();

    let mut page = app.state.create_practica_page();
    fill_practica(&mut page, "Backend Intern");
    page.change(PracticaField::FechaFin, day(-10));
    page.submit().await;

    assert!(page.field_error("fecha_fin").is_some());
    assert!(app.requests_to("POST", "/Create-practicas").is_empty());
}

#[actix_rt::test]
async fn edit_then_delete_refetches_each_time() {
    let app = TestApp::spawn().await;
    app.login_as_company();
    let first = app.seed_practica(practica_json("Soporte TI"));
    let second = app.seed_practica(practica_json("Mesa de ayuda"));

    let mut page = app.state.practica_list_page();
    page.mount().await;
    assert_eq!(page.rows().len(), 2);

    page.edit(first);
    page.change(PracticaField::Titulo, "Soporte TI Senior");
    page.submit_edit().await;

    assert_eq!(page.mode(), &ViewMode::List);
    assert_eq!(page.banner(), Some(&Banner::Success(MSG_UPDATE_SUCCESS.into())));
    let updates = app.requests_to("PUT", &format!("/Update-practicas/{}", first));
    assert_eq!(updates.len(), 1);
    assert!(updates[0].body.get("Id_Empresa").is_none());
    assert_eq!(page.practicas()[0].titulo, "Soporte TI Senior");

    page.delete(second).await;
    assert_eq!(page.banner(), Some(&Banner::Success(MSG_DELETE_SUCCESS.into())));
    assert_eq!(app.requests_to("DELETE", &format!("/Delete-practica/{}", second)).len(), 1);
    assert_eq!(page.rows().len(), 1);
    assert_eq!(app.practicas().len(), 1);

    assert_eq!(app.requests_to("GET", "/Get-practicas-empresa").len(), 3);
}

#[actix_rt::test]
async fn student_filters_and_applies() {
    let app = TestApp::spawn().await;
    app.login_as_student();
    app.seed_practica(practica_json("Desarrollador Frontend"));
    let backend_id = app.seed_practica(practica_json("Analista de Datos"));

    let mut page = app.state.browse_page();
    page.mount().await;
    assert!(matches!(page.state(), BrowseState::Ready { .. }));

    page.set_filter("DATOS");
    let visible = page.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, backend_id);

    let banner = page.apply(backend_id).await;
    assert_eq!(banner, Banner::Success(MSG_APPLY_SUCCESS.into()));

    let applies = app.requests_to("POST", &format!("/Rpracticas/{}/apply", backend_id));
    assert_eq!(applies.len(), 1);
    assert_eq!(applies[0].authorization.as_deref(), Some("Bearer student-token"));
    assert_eq!(applies[0].body, serde_json::json!({}));
    assert_eq!(page.visible().len(), 1);
}

#[actix_rt::test]
async fn rejected_token_ends_the_session() {
    let app = TestApp::spawn().await;
    app.login_as_company();
    app.reject_tokens();

    let mut page = app.state.practica_list_page();
    page.mount().await;

    assert_eq!(page.banner(), Some(&Banner::Error(MSG_SESSION_EXPIRED.into())));
    assert!(!app.state.session.is_authenticated());

    page.refresh().await;
    let listed = app.requests_to("GET", "/Get-practicas-empresa");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[1].authorization, None);
}

#[actix_rt::test]
async fn management_shell_switches_between_list_and_create() {
    let app = TestApp::spawn().await;
    app.login_as_company();
    app.seed_practica(practica_json("Soporte TI"));

    let mut shell = app.state.practica_shell();
    shell.mount().await;
    assert_eq!(shell.mode(), ShellMode::List);
    assert_eq!(shell.view()["content"]["rows"].as_array().map(Vec::len), Some(1));

    shell.switch_to(ShellMode::Create).await;
    if let ShellContent::Create(page) = shell.content_mut() {
        fill_practica(page, "Nueva práctica");
        page.submit().await;
    }
    assert_eq!(app.practicas().len(), 2);

    shell.switch_to(ShellMode::List).await;
    match shell.content() {
        ShellContent::List(page) => assert_eq!(page.rows().len(), 2),
        ShellContent::Create(_) => panic!("expected list mode"),
    }
}
