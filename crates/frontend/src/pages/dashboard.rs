//! Landing shells for each role area

use crate::auth::use_session;
use koov_core::{Role, UserDetails};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct WelcomeProps {
    title: AttrValue,
}

#[function_component(Welcome)]
fn welcome(props: &WelcomeProps) -> Html {
    let session = use_session();
    let Some(user) = session.user() else {
        return html! {};
    };

    html! {
        <section class="space-y-4">
            <h1 class="text-2xl font-bold">{ props.title.clone() }</h1>
            <p class="text-gray-600 dark:text-gray-400">
                { format!("Signed in as {} ({})", user.name, user.job_id) }
            </p>
            { sales_summary(user) }
        </section>
    }
}

fn sales_summary(user: &UserDetails) -> Html {
    if user.role != Role::Salesperson {
        return html! {};
    }
    html! {
        <dl class="grid grid-cols-2 gap-4 max-w-md">
            if let Some(area) = &user.area {
                <dt class="font-medium">{"Area"}</dt>
                <dd>{ area.clone() }</dd>
            }
            if let Some(total) = user.total_target_completed {
                <dt class="font-medium">{"Target completed"}</dt>
                <dd>{ total.to_string() }</dd>
            }
        </dl>
    }
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! { <Welcome title="Sales Dashboard" /> }
}

#[function_component(AdminPage)]
pub fn admin_page() -> Html {
    html! { <Welcome title="Admin Dashboard" /> }
}

#[function_component(ProductionPage)]
pub fn production_page() -> Html {
    html! { <Welcome title="Production Dashboard" /> }
}
