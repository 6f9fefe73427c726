use std::fmt::Display;

use shared::{DashboardLists, ListResource, ListUpdate};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct DashboardDataState {
    pub lists: DashboardLists,
    pub loading: bool,
}

pub struct UseDashboardDataResult {
    pub state: DashboardDataState,
    pub actions: UseDashboardDataActions,
}

#[derive(Clone, PartialEq)]
pub struct UseDashboardDataActions {
    /// Refetches every list in parallel
    pub reload: Callback<()>,
}

/// Turns one fetch result into a list update, logging failures so the cached list stays put
fn list_update<T, E: Display>(
    resource: ListResource,
    result: Result<T, E>,
    wrap: fn(T) -> ListUpdate,
) -> Option<ListUpdate> {
    match result {
        Ok(items) => Some(wrap(items)),
        Err(e) => {
            Logger::error_with_component(
                "dashboard-data",
                &format!("Failed to fetch {}: {}", resource.name(), e),
            );
            None
        }
    }
}

async fn fetch_all(api_client: &ApiClient, teacher_id: i64) -> Vec<ListUpdate> {
    let (classes, students, subjects, exams, materials, notices) = futures::join!(
        api_client.get_my_classes(teacher_id),
        api_client.get_my_students(teacher_id),
        api_client.get_my_subjects(teacher_id),
        api_client.get_my_exams(teacher_id),
        api_client.get_my_study_materials(teacher_id),
        api_client.get_notices(),
    );

    [
        list_update(ListResource::Classes, classes, ListUpdate::Classes),
        list_update(ListResource::Students, students, ListUpdate::Students),
        list_update(ListResource::Subjects, subjects, ListUpdate::Subjects),
        list_update(ListResource::Exams, exams, ListUpdate::Exams),
        list_update(ListResource::Materials, materials, ListUpdate::Materials),
        list_update(ListResource::Notices, notices, ListUpdate::Notices),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Hook owning the cached dashboard lists
#[hook]
pub fn use_dashboard_data(api_client: &ApiClient, teacher_id: i64) -> UseDashboardDataResult {
    let lists = use_mut_ref(DashboardLists::default);
    let loading = use_state(|| false);
    let force_update = use_force_update();

    let reload = {
        let api_client = api_client.clone();
        let lists = lists.clone();
        let loading = loading.clone();
        let force_update = force_update.clone();

        use_callback(teacher_id, move |_, teacher_id| {
            let api_client = api_client.clone();
            let lists = lists.clone();
            let loading = loading.clone();
            let force_update = force_update.clone();
            let teacher_id = *teacher_id;

            loading.set(true);
            spawn_local(async move {
                let updates = fetch_all(&api_client, teacher_id).await;
                Logger::debug_with_component(
                    "dashboard-data",
                    &format!("Refreshed {} of 6 lists", updates.len()),
                );

                {
                    let mut lists = lists.borrow_mut();
                    for update in updates {
                        lists.apply(update);
                    }
                }

                loading.set(false);
                force_update.force_update();
            });
        })
    };

    // Load everything on mount
    use_effect_with(teacher_id, {
        let reload = reload.clone();
        move |_| {
            reload.emit(());
            || ()
        }
    });

    let state = DashboardDataState {
        lists: lists.borrow().clone(),
        loading: *loading,
    };

    UseDashboardDataResult {
        state,
        actions: UseDashboardDataActions { reload },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::ApiError;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_successful_fetch_becomes_update() {
        let update = list_update(ListResource::Notices, Ok::<_, ApiError>(Vec::new()), ListUpdate::Notices);
        assert_eq!(update, Some(ListUpdate::Notices(Vec::new())));
    }

    #[wasm_bindgen_test]
    fn test_failed_fetch_yields_no_update() {
        let update = list_update(
            ListResource::Exams,
            Err::<Vec<shared::Exam>, _>(ApiError::Timeout(10_000)),
            ListUpdate::Exams,
        );
        assert_eq!(update, None);
    }
}
