use std::sync::Arc;

use serde::Serialize;

use crate::constants::{
    MSG_APPLY_FAILED, MSG_APPLY_SUCCESS, MSG_BROWSE_EMPTY, MSG_BROWSE_FAILED,
    MSG_SESSION_EXPIRED_STUDENT, NOT_AVAILABLE,
};
use crate::entities::practica::Practica;
use crate::errors::AppError;
use crate::repositories::practica::PracticaRepository;
use crate::use_cases::Banner;

/// Loading and failure gate whether the list is shown at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BrowseState {
    Loading,
    Failed { message: String },
    Ready { practicas: Vec<Practica>, filter: String },
}

/// Student-facing card; empty fields read "No disponible".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticaCard {
    pub id: i64,
    pub titulo: String,
    pub empresa: i64,
    pub ubicacion: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    pub requisitos: String,
    pub modalidad: String,
    pub area_practica: String,
    pub jornada: String,
}

fn or_not_available(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

impl From<&Practica> for PracticaCard {
    fn from(p: &Practica) -> Self {
        PracticaCard {
            id: p.id,
            titulo: p.titulo.clone(),
            empresa: p.id_empresa,
            ubicacion: or_not_available(Some(&p.ubicacion)),
            fecha_inicio: or_not_available(Some(&p.fecha_inicio)),
            fecha_fin: or_not_available(Some(&p.fecha_fin)),
            requisitos: or_not_available(Some(&p.requisitos)),
            modalidad: or_not_available(p.modalidad.as_deref()),
            area_practica: or_not_available(Some(&p.area_practica)),
            jornada: or_not_available(p.jornada.as_deref()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BrowseView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub loading: bool,
    pub filter: String,
    pub cards: Vec<PracticaCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

/// Filterable list of every open práctica with an apply action.
pub struct BrowsePracticasPage<R>
where
    R: PracticaRepository,
{
    repo: Arc<R>,
    state: BrowseState,
}

impl<R> BrowsePracticasPage<R>
where
    R: PracticaRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        BrowsePracticasPage {
            repo,
            state: BrowseState::Loading,
        }
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub async fn mount(&mut self) {
        self.state = BrowseState::Loading;
        self.state = match self.repo.list_all().await {
            Ok(practicas) => BrowseState::Ready {
                practicas,
                filter: String::new(),
            },
            Err(AppError::SessionExpired) => BrowseState::Failed {
                message: MSG_SESSION_EXPIRED_STUDENT.to_string(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load prácticas");
                BrowseState::Failed {
                    message: MSG_BROWSE_FAILED.to_string(),
                }
            }
        };
    }

    /// Ignored until the list has loaded.
    pub fn set_filter(&mut self, value: impl Into<String>) {
        if let BrowseState::Ready { filter, .. } = &mut self.state {
            *filter = value.into();
        }
    }

    /// Postings whose title contains the filter, ignoring case.
    pub fn visible(&self) -> Vec<&Practica> {
        match &self.state {
            BrowseState::Ready { practicas, filter } => {
                let needle = filter.to_lowercase();
                practicas
                    .iter()
                    .filter(|p| p.titulo.to_lowercase().contains(&needle))
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn view(&self) -> BrowseView {
        match &self.state {
            BrowseState::Loading => BrowseView {
                error: None,
                loading: true,
                filter: String::new(),
                cards: Vec::new(),
                empty_message: None,
            },
            BrowseState::Failed { message } => BrowseView {
                error: Some(message.clone()),
                loading: false,
                filter: String::new(),
                cards: Vec::new(),
                empty_message: None,
            },
            BrowseState::Ready { filter, .. } => {
                let cards: Vec<PracticaCard> = self.visible().into_iter().map(PracticaCard::from).collect();
                BrowseView {
                    error: None,
                    loading: false,
                    filter: filter.clone(),
                    empty_message: cards.is_empty().then_some(MSG_BROWSE_EMPTY),
                    cards,
                }
            }
        }
    }

    /// Applies to `id` and returns the acknowledgment to show. The list is
    /// left as it is.
    pub async fn apply(&self, id: i64) -> Banner {
        match self.repo.apply(id).await {
            Ok(()) => {
                tracing::info!(id, "Applied to práctica");
                Banner::Success(MSG_APPLY_SUCCESS.to_string())
            }
            Err(AppError::SessionExpired) => Banner::Error(MSG_SESSION_EXPIRED_STUDENT.to_string()),
            Err(e) => {
                tracing::warn!(id, error = %e, "Failed to apply");
                Banner::Error(MSG_APPLY_FAILED.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::repositories::practica::MockPracticaRepository;

    fn practica(id: i64, titulo: &str) -> Practica {
        Practica {
            id,
            titulo: titulo.into(),
            descripcion: String::new(),
            id_empresa: 2,
            ubicacion: "Valparaíso".into(),
            fecha_inicio: "2026-11-01T00:00:00Z".into(),
            fecha_fin: String::new(),
            requisitos: String::new(),
            fecha_expiracion: String::new(),
            modalidad: None,
            area_practica: "TI".into(),
            jornada: Some(" ".into()),
        }
    }

    fn titles(page: &BrowsePracticasPage<MockPracticaRepository>) -> Vec<String> {
        page.visible().into_iter().map(|p| p.titulo.clone()).collect()
    }

    async fn loaded() -> BrowsePracticasPage<MockPracticaRepository> {
        let mut repo = MockPracticaRepository::new();
        repo.expect_list_all().times(1).returning(|| {
            Ok(vec![
                practica(1, "Backend Intern"),
                practica(2, "Frontend Intern"),
                practica(3, "Data Analyst"),
            ])
        });
        let mut page = BrowsePracticasPage::new(Arc::new(repo));
        page.mount().await;
        page
    }

    #[tokio::test]
    async fn filter_is_case_insensitive_on_title() {
        let mut page = loaded().await;
        assert_eq!(titles(&page).len(), 3);

        page.set_filter("INTERN");
        assert_eq!(titles(&page), vec!["Backend Intern", "Frontend Intern"]);

        page.set_filter("intern back");
        assert!(titles(&page).is_empty());
        assert_eq!(page.view().empty_message, Some(MSG_BROWSE_EMPTY));

        page.set_filter("");
        assert_eq!(titles(&page).len(), 3);
    }

    #[tokio::test]
    async fn narrowing_never_grows_results() {
        let mut page = loaded().await;
        let mut previous = usize::MAX;
        for filter in ["", "a", "an", "ana", "anal"] {
            page.set_filter(filter);
            let count = page.visible().len();
            assert!(count <= previous, "{} grew the result set", filter);
            previous = count;
        }
    }

    #[tokio::test]
    async fn cards_fill_missing_fields() {
        let page = loaded().await;
        let card = &page.view().cards[0];
        assert_eq!(card.ubicacion, "Valparaíso");
        assert_eq!(card.fecha_fin, NOT_AVAILABLE);
        assert_eq!(card.modalidad, NOT_AVAILABLE);
        assert_eq!(card.jornada, NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn load_failures_gate_the_list() {
        let mut repo = MockPracticaRepository::new();
        repo.expect_list_all().times(1).returning(|| Err(AppError::SessionExpired));
        let mut page = BrowsePracticasPage::new(Arc::new(repo));
        assert_eq!(page.state(), &BrowseState::Loading);

        page.mount().await;
        assert_eq!(
            page.state(),
            &BrowseState::Failed { message: MSG_SESSION_EXPIRED_STUDENT.into() }
        );
        assert!(page.view().cards.is_empty());

        let mut repo = MockPracticaRepository::new();
        repo.expect_list_all()
            .returning(|| Err(AppError::Transport("timeout".into())));
        let mut page = BrowsePracticasPage::new(Arc::new(repo));
        page.mount().await;
        assert_eq!(page.view().error.as_deref(), Some(MSG_BROWSE_FAILED));
    }

    #[tokio::test]
    async fn apply_acknowledges_without_touching_the_list() {
        let mut repo = MockPracticaRepository::new();
        repo.expect_list_all().times(1).returning(|| Ok(vec![practica(8, "Backend Intern")]));
        repo.expect_apply().withf(|id| *id == 8).times(1).returning(|_| Ok(()));
        repo.expect_apply()
            .withf(|id| *id == 9)
            .times(1)
            .returning(|_| Err(AppError::Request { status: 409, message: None }));

        let mut page = BrowsePracticasPage::new(Arc::new(repo));
        page.mount().await;
        let before = page.state().clone();

        assert_eq!(page.apply(8).await, Banner::Success(MSG_APPLY_SUCCESS.into()));
        assert_eq!(page.apply(9).await, Banner::Error(MSG_APPLY_FAILED.into()));
        assert_eq!(page.state(), &before);
    }
}
