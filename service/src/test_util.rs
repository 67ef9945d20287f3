//! Helpers for testing [`Service`] against a [`Memory`] database.

use std::time::Duration;

use common::operations::Insert;
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::{
    domain::{user, User},
    infra::{Database as _, Memory},
    Config, Service,
};

/// Secret signing session tokens in tests.
const JWT_SECRET: &[u8] = b"hiring-pipeline-test-secret";

/// Creates a new [`Service`] over an empty [`Memory`] database.
pub(crate) fn service() -> fixture::Svc {
    Service::new(
        Config {
            jwt_encoding_key: EncodingKey::from_secret(JWT_SECRET),
            jwt_decoding_key: DecodingKey::from_secret(JWT_SECRET),
            session_ttl: Duration::from_secs(30 * 60),
        },
        Memory::new(),
    )
}

/// Stores a new admin [`User`] with the `password123` password.
pub(crate) async fn seed_user(
    svc: &fixture::Svc,
    name: &str,
    email: &str,
) -> User {
    let user = User {
        id: user::Id::new(),
        name: user::Name::new(name).unwrap(),
        email: user::Email::new(email).unwrap(),
        role: user::Role::Admin,
        password_hash: user::PasswordHash::new(
            &user::Password::new("password123").unwrap(),
        ),
    };
    svc.database().execute(Insert(user.clone())).await.unwrap();
    user
}

pub(crate) mod fixture {
    //! Ready-made entities of the hiring pipeline.

    use common::operations::Insert;

    use crate::{
        command::{
            Command as _, CreateApplicant, CreateApplication, CreateVacancy,
        },
        domain::{
            application, department, vacancy, Application, Department,
            Evaluation, StatusEvent, Vacancy,
        },
        infra::{Database as _, Memory},
        query, Query as _, Service,
    };

    /// [`Service`] used in tests.
    pub(crate) type Svc = Service<Memory>;

    /// Stores a new [`Department`].
    pub(crate) async fn department(svc: &Svc) -> Department {
        let dept = Department {
            id: department::Id::new(),
            name: "College of Computing Studies".parse().unwrap(),
        };
        svc.database().execute(Insert(dept.clone())).await.unwrap();
        dept
    }

    /// Creates a new open [`Vacancy`] in a new [`Department`].
    pub(crate) async fn vacancy(svc: &Svc) -> Vacancy {
        let dept = department(svc).await;
        svc.execute(CreateVacancy {
            position_title: "Instructor I".parse().unwrap(),
            department_id: dept.id,
            salary_grade: vacancy::SalaryGrade::new(12).unwrap(),
            qualifications: "Master's degree in Computer Science"
                .parse()
                .unwrap(),
            posting_date: Some("2026-01-05".parse().unwrap()),
            closing_date: "2026-02-05".parse().unwrap(),
            status: None,
        })
        .await
        .unwrap()
    }

    /// Registers a new applicant with the provided `name` and files its
    /// [`Application`] to the provided [`Vacancy`].
    pub(crate) async fn apply(
        svc: &Svc,
        vacancy: &Vacancy,
        name: &str,
    ) -> Application {
        let applicant = svc
            .execute(CreateApplicant {
                full_name: name.parse().unwrap(),
                contact_number: "09171234567".parse().unwrap(),
                email: "applicant@example.com".parse().unwrap(),
                address: "Normal Road, Baliwasan".parse().unwrap(),
                educational_background: "BS Computer Science".parse().unwrap(),
                work_experience: "2 years as a developer".parse().unwrap(),
            })
            .await
            .unwrap();

        svc.execute(CreateApplication {
            applicant_id: applicant.id,
            vacancy_id: vacancy.id,
            status: None,
            date_applied: Some("2026-01-10".parse().unwrap()),
            remarks: None,
        })
        .await
        .unwrap()
    }

    /// Files a new [`Application`] to a fresh [`Vacancy`].
    pub(crate) async fn application(svc: &Svc) -> Application {
        let vacancy = vacancy(svc).await;
        apply(svc, &vacancy, "Ana Reyes").await
    }

    /// Returns the recorded [`StatusEvent`]s of an [`Application`].
    pub(crate) async fn history(
        svc: &Svc,
        id: application::Id,
    ) -> Vec<StatusEvent> {
        svc.execute(query::status_history::ByApplication::by(id))
            .await
            .unwrap()
    }

    /// Returns all the stored [`Evaluation`]s.
    pub(crate) async fn evaluations(svc: &Svc) -> Vec<Evaluation> {
        svc.execute(query::evaluation::List::by(())).await.unwrap()
    }

    /// Looks up an [`Application`] by its ID.
    pub(crate) async fn find_application(
        svc: &Svc,
        id: application::Id,
    ) -> Option<Application> {
        svc.execute(query::application::ById::by(id)).await.unwrap()
    }
}
