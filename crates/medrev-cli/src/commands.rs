use std::collections::BTreeSet;
use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use medrev_client::{
    ClientConfig, CredentialStore, HttpPharmacyApi, InMemoryCredentials, PharmacyApi,
};
use medrev_model::{Registration, Role};
use medrev_select::{MedicineFilter, MedicineSelection, UserFilter, UserSelection};
use medrev_workflow::{
    MedicineReview, SaveOutcome, Session, StatusOutcome, UserDirectory, ViewScope,
};

use crate::cli::{
    Cli, Command, EmployeeCommand, EmployeeCreateArgs, EmployeeListArgs, EmployeeUpdateArgs,
    LoginArgs, MedicineCommand, MedicineEditArgs, MedicineListArgs,
};
use medrev_cli::render;

/// Bearer token for protected calls, as printed by `medrev login`.
pub const TOKEN_VAR: &str = "MEDREV_TOKEN";
/// Id of the signed-in employee; marks the viewer's own row.
pub const USER_ID_VAR: &str = "MEDREV_USER_ID";

struct App {
    api: Arc<HttpPharmacyApi>,
    session: Arc<Session>,
    credentials: Arc<InMemoryCredentials>,
    config: ClientConfig,
}

impl App {
    fn new(api_url: Option<String>) -> Result<Self> {
        let config = ClientConfig::from_env_with_url(api_url)?;
        let credentials = Arc::new(match env::var(TOKEN_VAR) {
            Ok(token) => InMemoryCredentials::with_token(token),
            Err(_) => InMemoryCredentials::new(),
        });
        let api = Arc::new(
            HttpPharmacyApi::new(&config, credentials.clone()).context("build http client")?,
        );
        let session = Session::new(credentials.clone());
        Ok(Self {
            api,
            session,
            credentials,
            config,
        })
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let app = App::new(cli.api_url.clone())?;
    match cli.command {
        Command::Login(args) => login(&app, &args).await,
        Command::Employees(command) => employees(&app, command).await,
        Command::Medicines(command) => medicines(&app, command).await,
    }
}

async fn login(app: &App, args: &LoginArgs) -> Result<()> {
    app.session
        .sign_in(app.api.as_ref(), &args.id, &args.password)
        .await?;
    let token = app
        .credentials
        .token()
        .context("login succeeded but no token was stored")?;
    println!("Signed in as {}.", args.id);
    println!();
    println!("export {TOKEN_VAR}={token}");
    println!("export {USER_ID_VAR}={}", args.id);
    Ok(())
}

async fn employees(app: &App, command: EmployeeCommand) -> Result<()> {
    let mut directory = UserDirectory::new(app.api.clone(), app.session.clone());
    let scope = ViewScope::new();
    match command {
        EmployeeCommand::List(args) => {
            directory.enter(&scope).await?;
            print_employee_list(&directory, &args);
        }
        EmployeeCommand::Show { id } => {
            directory.load_detail(&scope, &id).await?;
            if let Some(user) = directory.slice.store.current() {
                println!("{}", render::user_detail(user));
            }
        }
        EmployeeCommand::Create(args) => {
            let user = directory.create(&registration_from(&args)).await?;
            println!("Account {} created.", user.id);
            println!("{}", render::user_detail(&user));
        }
        EmployeeCommand::Update(args) => {
            let original = app.api.get_user(&args.id).await?;
            let edited = apply_user_edits(&original, &args);
            match directory.save_profile(&original, &edited).await? {
                SaveOutcome::NoChanges => println!("No changes to save."),
                SaveOutcome::Saved(fields) => println!("Saved: {}.", fields.join(", ")),
            }
        }
        EmployeeCommand::Delete { id } => {
            directory.remove(&id).await?;
            println!("Account {id} deleted.");
        }
    }
    Ok(())
}

fn print_employee_list(directory: &UserDirectory, args: &EmployeeListArgs) {
    let mut criteria = UserFilter::default();
    for role in Role::all() {
        if args.roles.iter().any(|arg| Role::from(*arg) == role) {
            criteria.toggle_role(role);
        }
    }
    let query = args.search.clone().unwrap_or_default();
    let mut selection = UserSelection::new();
    let view = selection.select(
        directory.slice.store.generation(),
        directory.slice.store.records(),
        &criteria,
        &query,
        args.sort.into(),
    );
    let viewer = env::var(USER_ID_VAR).ok();
    if view.is_empty() {
        println!("No employees match.");
        return;
    }
    println!("{}", render::users_table(view, viewer.as_deref()));
    println!("{} of {} employees", view.len(), directory.slice.store.len());
}

fn registration_from(args: &EmployeeCreateArgs) -> Registration {
    Registration {
        id: args.id.clone(),
        password: args.password.clone(),
        firstname: args.firstname.clone(),
        surname: args.surname.clone(),
        email: args.email.clone(),
        role: args.role.into(),
    }
}

fn apply_user_edits(
    original: &medrev_model::User,
    args: &EmployeeUpdateArgs,
) -> medrev_model::User {
    let mut edited = original.clone();
    if let Some(firstname) = &args.firstname {
        edited.firstname = firstname.clone();
    }
    if let Some(surname) = &args.surname {
        edited.surname = surname.clone();
    }
    if let Some(email) = &args.email {
        edited.email = email.clone();
    }
    if let Some(role) = args.role {
        edited.role = role.into();
    }
    edited
}

async fn medicines(app: &App, command: MedicineCommand) -> Result<()> {
    let mut review = MedicineReview::new(app.api.clone(), app.session.clone(), &app.config);
    let scope = ViewScope::new();
    match command {
        MedicineCommand::List(args) => {
            review.enter(&scope, args.status.into()).await?;
            print_medicine_list(&review, &args);
        }
        MedicineCommand::Show { name, similar } => {
            review
                .open_detail(&scope, &name, similar.as_deref())
                .await?;
            if let Some(medicine) = review.slice.store.current() {
                println!("{}", render::medicine_detail(medicine));
            }
            if let Some(report) = &review.report {
                println!("{}", render::similarity_table(report));
            } else if let Some(message) = review.similarity.phase.error() {
                eprintln!("similarity report unavailable: {message}");
            }
        }
        MedicineCommand::Approve { name } => {
            review.load_detail(&scope, &name).await?;
            match review.approve().await? {
                StatusOutcome::Applied => print_status_result(&review, &name),
                StatusOutcome::Refused => println!("{name} is already approved."),
            }
        }
        MedicineCommand::Decline { name } => {
            review.load_detail(&scope, &name).await?;
            match review.decline().await? {
                StatusOutcome::Applied => print_status_result(&review, &name),
                StatusOutcome::Refused => println!("{name} is already completed."),
            }
        }
        MedicineCommand::Edit(args) => {
            let original = app.api.get_medicine_by_name(&args.name).await?;
            let edited = apply_medicine_edits(&original, &args);
            match review.save_edits(&original, &edited).await? {
                SaveOutcome::NoChanges => println!("No changes to save."),
                SaveOutcome::Saved(fields) => println!("Saved: {}.", fields.join(", ")),
            }
        }
        MedicineCommand::Similar { response_id } => {
            review.load_similarity(&scope, &response_id).await?;
            match &review.report {
                Some(report) if report.matches.is_empty() => {
                    println!("No look-alike candidates found.");
                }
                Some(report) => println!("{}", render::similarity_table(report)),
                None => println!("No report available."),
            }
        }
    }
    Ok(())
}

fn print_medicine_list(review: &MedicineReview, args: &MedicineListArgs) {
    let mut criteria = MedicineFilter::default();
    let buckets: BTreeSet<&str> = args.categories.iter().map(String::as_str).collect();
    for bucket in buckets {
        criteria.group.toggle(bucket);
    }
    if let Some(window) = args.within {
        criteria.toggle_date(window.into());
    }
    let query = args.query.clone().unwrap_or_default();
    let mut selection = MedicineSelection::new();
    let view = selection.select(
        review.slice.store.generation(),
        review.slice.store.records(),
        &criteria,
        &query,
        args.sort.into(),
        Utc::now(),
    );
    if view.is_empty() {
        println!("No medicines match.");
        return;
    }
    println!("{}", render::medicines_table(view));
    println!("{} of {} medicines", view.len(), review.slice.store.len());
}

fn apply_medicine_edits(
    original: &medrev_model::Medicine,
    args: &MedicineEditArgs,
) -> medrev_model::Medicine {
    let mut edited = original.clone();
    if let Some(product_name) = &args.product_name {
        edited.product_name = product_name.clone();
    }
    if let Some(category) = &args.category {
        // An explicit empty value clears the category.
        edited.category = (!category.is_empty()).then(|| category.clone());
    }
    if let Some(intake_method) = &args.intake_method {
        edited.intake_method = intake_method.clone();
    }
    if let Some(manufacturer) = &args.manufacturer {
        edited.manufacturer = manufacturer.clone();
    }
    if let Some(manufacturing_country) = &args.manufacturing_country {
        edited.manufacturing_country = manufacturing_country.clone();
    }
    if let Some(country_registration) = &args.country_registration {
        edited.country_registration = country_registration.clone();
    }
    if let Some(barcode) = &args.barcode {
        edited.barcode = barcode.clone();
    }
    if let Some(type_packaging) = &args.type_packaging {
        edited.type_packaging = type_packaging.clone();
    }
    edited
}

fn print_status_result(review: &MedicineReview, name: &str) {
    match review.slice.store.current() {
        Some(medicine) => {
            info!(%name, status = %medicine.status, "status updated");
            println!("{name} is now {}.", medicine.status.label().to_lowercase());
        }
        None => println!("Status updated; re-fetch of {name} did not return a record."),
    }
}
