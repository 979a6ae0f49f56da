use leptos::prelude::*;

use crate::api::types::{CycleReport, Job};
use crate::components::common::{BusyButton, EmptyState, ErrorBanner, Loading};
use crate::controller::Loadable;

const JOB_CYCLE_QUERY: &str = "job opportunities";

fn subtitle(job: &Job) -> String {
	[job.company.as_deref(), job.location.as_deref(), job.salary.as_deref()]
		.into_iter()
		.flatten()
		.filter(|s| !s.is_empty())
		.collect::<Vec<_>>()
		.join(" · ")
}

#[component]
pub fn JobsFeed() -> impl IntoView {
	let jobs = Loadable::<Vec<Job>>::new();
	let reload = move || jobs.load(|api| async move { api.jobs().await });
	reload();

	let running = RwSignal::new(false);
	let note = RwSignal::new(None::<String>);
	let search = Callback::new(move |_: ()| {
		running.set(true);
		let api = jobs.api();
		jobs.mutate(
			async move {
				let report = api.run_cycle(JOB_CYCLE_QUERY).await;
				running.try_set(false);
				report
			},
			move |report: CycleReport| {
				note.set(Some(report.headline()));
				reload();
			},
		);
	});

	view! {
		<div class="page jobs-page">
			<header class="toolbar">
				<h1>"Jobs feed"</h1>
				<BusyButton label="Find new jobs" busy_label="Searching" busy=running on_click=search />
			</header>
			{move || note.get().map(|n| view! { <p class="notice">{n}</p> })}
			<ErrorBanner message=jobs.error on_retry=Callback::new(move |_| reload()) />
			{move || match jobs.data.get() {
				None if jobs.is_loading() => view! { <Loading label="Loading jobs" /> }.into_any(),
				None => ().into_any(),
				Some(list) if list.is_empty() => view! {
					<EmptyState
						message="No jobs found yet."
						hint="Run a job search to let your assistant look for openings that fit your profile."
					/>
				}
					.into_any(),
				Some(list) => view! {
					<ul class="job-list">
						{list
							.into_iter()
							.map(|job| {
								let meta = subtitle(&job);
								view! {
									<li class="job">
										<h3>
											{match job.url {
												Some(url) => view! {
													<a href=url target="_blank" rel="noopener">{job.title}</a>
												}
													.into_any(),
												None => job.title.into_any(),
											}}
										</h3>
										<p class="meta">{meta}</p>
										{job.status.map(|s| view! { <span class="status">{s}</span> })}
										{job.posted_at.map(|p| view! { <time>{p}</time> })}
										{job.description.map(|d| view! { <p class="description">{d}</p> })}
									</li>
								}
							})
							.collect_view()}
					</ul>
				}
					.into_any(),
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn subtitle_skips_missing_parts() {
		let job = Job {
			title: "Engineer".into(),
			company: Some("Acme".into()),
			salary: Some(String::new()),
			location: Some("Remote".into()),
			..Job::default()
		};
		assert_eq!(subtitle(&job), "Acme · Remote");
		assert_eq!(subtitle(&Job::default()), "");
	}
}
