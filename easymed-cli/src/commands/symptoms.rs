//! Interactive symptom checker

use anyhow::Result;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use locale_context::LocaleContext;
use std::time::Duration;
use symptom_checker::{
    DiagnosisReport, DiagnosisResult, DurationBucket, Gender, HttpSymptomAnalyzer, Severity, SymptomAnalyzer,
    SymptomWizard, Urgency, WizardStep, COMMON_SYMPTOMS, EXISTING_CONDITIONS,
};

use super::{prompt_error, require_terminal};
use crate::App;

enum AfterAnalysis {
    Stay,
    Back,
    Restart,
    Done,
}

pub async fn run(app: &App) -> Result<()> {
    require_terminal("symptoms")?;
    let theme = ColorfulTheme::default();
    let locale = &app.locale;
    let analyzer = HttpSymptomAnalyzer::new(&app.config.analysis);
    let mut wizard = SymptomWizard::new(locale.clone());

    println!("{}", locale.t("symptoms.title").bright_cyan().bold());
    println!("{}", locale.t("symptoms.header").dimmed());

    loop {
        let step = wizard.step();
        println!();
        println!(
            "{} {}",
            format!("[{}/4]", step.number()).bright_blue(),
            locale.t(step.title_key()).bold()
        );

        match step {
            WizardStep::PatientInfo => patient_info(&mut wizard, locale, &theme)?,
            WizardStep::Symptoms => select_symptoms(&mut wizard, &theme)?,
            WizardStep::Details => symptom_details(&mut wizard, locale, &theme)?,
            WizardStep::Analysis => {
                match analysis(&mut wizard, &analyzer, locale, &theme).await? {
                    AfterAnalysis::Stay => {}
                    AfterAnalysis::Back => {
                        wizard.back();
                    }
                    AfterAnalysis::Restart => wizard.reset(),
                    AfterAnalysis::Done => return Ok(()),
                }
                continue;
            }
        }

        if step != WizardStep::PatientInfo && !go_forward(step, locale, &theme)? {
            wizard.back();
            continue;
        }
        if wizard.next().is_err() {
            if let Some(status) = wizard.status() {
                println!("{}", status.yellow());
            }
        }
    }
}

fn go_forward(step: WizardStep, locale: &LocaleContext, theme: &ColorfulTheme) -> Result<bool> {
    let next_key = match step {
        WizardStep::Symptoms => "symptoms.next_duration_details",
        _ => "symptoms.analyze",
    };
    let choice = Select::with_theme(theme)
        .items(&[locale.t(next_key), locale.t("symptoms.back")])
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    Ok(choice == 0)
}

fn patient_info(wizard: &mut SymptomWizard, locale: &LocaleContext, theme: &ColorfulTheme) -> Result<()> {
    println!("{}", locale.t("symptoms.patient_information").underline());

    loop {
        let current = wizard.patient().age.map(|age| age.to_string()).unwrap_or_default();
        let age: String = Input::with_theme(theme)
            .with_prompt(locale.t("symptoms.age"))
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        match wizard.set_age_text(&age) {
            Ok(()) => break,
            Err(err) => println!("{}", err.to_string().yellow()),
        }
    }

    let genders: Vec<String> = Gender::ALL.iter().map(|g| locale.t(g.label_key())).collect();
    let current = wizard
        .patient()
        .gender
        .and_then(|g| Gender::ALL.iter().position(|other| *other == g))
        .unwrap_or(0);
    let gender = Select::with_theme(theme)
        .with_prompt(locale.t("symptoms.select_gender"))
        .items(&genders)
        .default(current)
        .interact()
        .map_err(prompt_error)?;
    wizard.set_gender(Gender::ALL[gender]);

    let checked: Vec<bool> = EXISTING_CONDITIONS
        .iter()
        .map(|c| wizard.patient().existing_conditions.contains(*c))
        .collect();
    let picked = MultiSelect::with_theme(theme)
        .with_prompt(locale.t("symptoms.existing_conditions"))
        .items(&EXISTING_CONDITIONS)
        .defaults(&checked)
        .interact()
        .map_err(prompt_error)?;
    for (index, condition) in EXISTING_CONDITIONS.iter().enumerate() {
        if picked.contains(&index) != checked[index] {
            wizard.toggle_condition(condition);
        }
    }

    let medications: String = Input::with_theme(theme)
        .with_prompt(locale.t("symptoms.medications"))
        .with_initial_text(wizard.patient().medications.join(", "))
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    while wizard.remove_medication(0).is_some() {}
    for medication in medications.split(',') {
        wizard.add_medication(medication);
    }

    let description: String = Input::with_theme(theme)
        .with_prompt(locale.t("symptoms.describe_label"))
        .with_initial_text(wizard.patient().description.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    wizard.set_description(&description);
    Ok(())
}

fn select_symptoms(wizard: &mut SymptomWizard, theme: &ColorfulTheme) -> Result<()> {
    let names: Vec<&str> = COMMON_SYMPTOMS.iter().map(|s| s.name).collect();
    let checked: Vec<bool> = COMMON_SYMPTOMS.iter().map(|s| wizard.is_selected(s.id)).collect();
    let picked = MultiSelect::with_theme(theme)
        .items(&names)
        .defaults(&checked)
        .interact()
        .map_err(prompt_error)?;

    for (index, template) in COMMON_SYMPTOMS.iter().enumerate() {
        if picked.contains(&index) {
            wizard.add_symptom(template.id)?;
        } else {
            wizard.remove_symptom(template.id);
        }
    }
    Ok(())
}

fn symptom_details(wizard: &mut SymptomWizard, locale: &LocaleContext, theme: &ColorfulTheme) -> Result<()> {
    let durations: Vec<String> = DurationBucket::ALL.iter().map(|d| locale.t(d.label_key())).collect();
    let severities: Vec<String> = Severity::ALL.iter().map(|s| locale.t(s.label_key())).collect();
    let selected: Vec<_> = wizard
        .symptoms()
        .iter()
        .map(|s| (s.id.clone(), s.name.clone(), s.duration, s.severity))
        .collect();

    for (id, name, duration, severity) in selected {
        println!("{}", name.bold());
        let duration = Select::with_theme(theme)
            .with_prompt(locale.t("symptoms.duration"))
            .items(&durations)
            .default(DurationBucket::ALL.iter().position(|d| *d == duration).unwrap_or(0))
            .interact()
            .map_err(prompt_error)?;
        let severity = Select::with_theme(theme)
            .with_prompt(locale.t("symptoms.severity"))
            .items(&severities)
            .default(Severity::ALL.iter().position(|s| *s == severity).unwrap_or(0))
            .interact()
            .map_err(prompt_error)?;

        wizard.set_duration(&id, DurationBucket::ALL[duration])?;
        wizard.set_severity(&id, Severity::ALL[severity])?;
    }
    Ok(())
}

async fn analysis(
    wizard: &mut SymptomWizard,
    analyzer: &dyn SymptomAnalyzer,
    locale: &LocaleContext,
    theme: &ColorfulTheme,
) -> Result<AfterAnalysis> {
    println!("{}", locale.t("symptoms.will_analyze").dimmed());
    let choice = Select::with_theme(theme)
        .items(&[locale.t("symptoms.start_analysis"), locale.t("symptoms.back")])
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    if choice == 1 {
        return Ok(AfterAnalysis::Back);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.set_message(locale.t("symptoms.analyzing"));
    spinner.enable_steady_tick(Duration::from_millis(80));
    let outcome = wizard.analyze(analyzer).await.cloned();
    spinner.finish_and_clear();

    match outcome {
        Ok(result) => print_report(&result, locale),
        Err(_) => {
            if let Some(status) = wizard.status() {
                println!("{}", status.bright_red());
            }
            return Ok(AfterAnalysis::Stay);
        }
    }

    let again = Confirm::with_theme(theme)
        .with_prompt(locale.t("symptoms.new_analysis"))
        .default(false)
        .interact()
        .map_err(prompt_error)?;
    Ok(if again {
        AfterAnalysis::Restart
    } else {
        AfterAnalysis::Done
    })
}

fn print_report(result: &DiagnosisResult, locale: &LocaleContext) {
    let report = DiagnosisReport::new(result, locale);
    let urgency = match result.urgency {
        Urgency::Emergency => report.urgency_label().bright_red().bold(),
        Urgency::Urgent => report.urgency_label().bright_yellow().bold(),
        Urgency::Routine => report.urgency_label().bright_green(),
    };

    println!();
    println!("{} {}", urgency, report.urgency_description().dimmed());
    print!("{}", report.render());
    println!();
    println!("{} {}", locale.t("symptoms.listen").bold(), report.spoken_summary().italic());
}
