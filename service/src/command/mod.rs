//! [`Command`] definition.

pub mod attach_itinerary;
pub mod create_artist;
pub mod create_booking;
pub mod create_invoice;
pub mod create_promoter;
pub mod create_venue;
pub mod generate_contract;
pub mod mark_invoice_paid;
pub mod refresh_store;
pub mod send_invoice;
pub mod transit_booking;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    attach_itinerary::AttachItinerary, create_artist::CreateArtist,
    create_booking::CreateBooking, create_invoice::CreateInvoice,
    create_promoter::CreatePromoter, create_venue::CreateVenue,
    generate_contract::GenerateContract, mark_invoice_paid::MarkInvoicePaid,
    refresh_store::RefreshStore, send_invoice::SendInvoice,
    transit_booking::{ApproveContract, CancelBooking, CompleteBooking},
};

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::{By, Select};

    use crate::{
        domain::{
            artist, booking, contact, contract, invoice, itinerary, promoter,
            venue, Booking,
        },
        infra::{database::memory::Outage, Memory},
        store::Store,
        task, Config, Service,
    };

    use super::{
        create_booking, create_invoice, generate_contract, mark_invoice_paid,
        transit_booking, ApproveContract, AttachItinerary, CancelBooking,
        Command as _, CompleteBooking, CreateArtist, CreateBooking,
        CreateInvoice, CreatePromoter, CreateVenue, GenerateContract,
        MarkInvoicePaid, RefreshStore, SendInvoice,
    };

    fn service() -> Service<Memory> {
        Service {
            config: Config {
                documents_base_url: "https://docs.example.com/".into(),
                mark_overdue_invoices: task::mark_overdue_invoices::Config {
                    interval: Duration::from_secs(60),
                },
            },
            database: Memory::new(),
            store: Store::new(),
        }
    }

    /// Creates a [`Booking`] with all its parties, so the `fee` is billed.
    async fn propose(svc: &Service<Memory>, fee: &str) -> Booking {
        let artist = svc
            .execute(CreateArtist {
                name: artist::Name::new("Nina Simone").unwrap(),
                email: contact::Email::new("nina@agency.com").unwrap(),
                phone: contact::Phone::new("+1 555 123 4567").unwrap(),
                genre: artist::Genre::new("Jazz").unwrap(),
                bio: artist::Bio::new("High Priestess of Soul").unwrap(),
                image_url: None,
            })
            .await
            .unwrap();
        let promoter = svc
            .execute(CreatePromoter {
                name: promoter::Name::new("Max Weber").unwrap(),
                email: contact::Email::new("max@livenation.com").unwrap(),
                phone: contact::Phone::new("5559876543").unwrap(),
                company: promoter::Company::new("Live Nation").unwrap(),
            })
            .await
            .unwrap();
        let venue = svc
            .execute(CreateVenue {
                name: venue::Name::new("Blue Note").unwrap(),
                city: venue::City::new("New York").unwrap(),
                state: Some(venue::State::new("NY").unwrap()),
                capacity: venue::Capacity::new(300).unwrap(),
            })
            .await
            .unwrap();

        svc.execute(CreateBooking {
            artist_id: artist.id,
            promoter_id: promoter.id,
            venue_id: venue.id,
            date: booking::EventDate::today().checked_add_days(60).unwrap(),
            fee: booking::Fee::new(fee.parse().unwrap()).unwrap(),
        })
        .await
        .unwrap()
    }

    fn invoice_due_in(booking_id: booking::Id, days: i64) -> CreateInvoice {
        CreateInvoice {
            booking_id,
            amount: None,
            due_date: invoice::DueDate::today().checked_add_days(days).unwrap(),
            notes: None,
        }
    }

    fn itinerary_of(booking_id: booking::Id) -> AttachItinerary {
        AttachItinerary {
            booking_id,
            date: itinerary::ScheduleDate::today(),
            items: itinerary::Items::new(vec![itinerary::Item {
                time: "18:00".parse().unwrap(),
                kind: itinerary::Kind::Soundcheck,
                description: itinerary::Description::new("Line check").unwrap(),
                location: None,
            }])
            .unwrap(),
            notes: None,
        }
    }

    async fn stored(svc: &Service<Memory>, id: booking::Id) -> Booking {
        svc.store()
            .read(|s| s.bookings.get(id).cloned())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn bills_confirmed_booking_once() {
        let svc = service();
        let booking = propose(&svc, "5000USD").await;
        assert_eq!(booking.status(), booking::Status::Proposed);
        assert_eq!(booking.documents(), booking::Documents::default());

        let err = svc
            .execute(invoice_due_in(booking.id, 30))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            create_invoice::ExecutionError::IneligibleBooking(_),
        ));

        let booking = svc
            .execute(ApproveContract {
                booking_id: booking.id,
            })
            .await
            .unwrap();
        assert_eq!(booking.status(), booking::Status::Confirmed);
        assert!(!booking.documents().has_contract());

        let err = svc
            .execute(ApproveContract {
                booking_id: booking.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            transit_booking::ExecutionError::InvalidTransition(_),
        ));

        let invoice = svc
            .execute(invoice_due_in(booking.id, 30))
            .await
            .unwrap();
        assert_eq!(invoice.status(), invoice::Status::Draft);
        assert_eq!(invoice.amount.to_string(), "5000USD");
        assert!(invoice.sent_at().is_none());
        assert!(invoice.paid_at().is_none());
        assert!(stored(&svc, booking.id).await.documents().has_invoice());

        let err = svc
            .execute(invoice_due_in(booking.id, 30))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            create_invoice::ExecutionError::IneligibleBooking(id)
                if *id == booking.id,
        ));

        let sent = svc
            .execute(SendInvoice {
                invoice_id: invoice.id,
            })
            .await
            .unwrap();
        assert_eq!(sent.status(), invoice::Status::Sent);
        assert!(sent.sent_at().is_some());

        let paid = svc
            .execute(MarkInvoicePaid {
                invoice_id: invoice.id,
            })
            .await
            .unwrap();
        assert_eq!(paid.status(), invoice::Status::Paid);
        assert!(paid.paid_at().is_some());

        let err = svc
            .execute(MarkInvoicePaid {
                invoice_id: invoice.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            mark_invoice_paid::ExecutionError::InvalidTransition(_),
        ));

        let stored = svc
            .store()
            .read(|s| s.invoice_of(booking.id).cloned())
            .await
            .unwrap();
        assert_eq!(stored.status(), invoice::Status::Paid);
        assert_eq!(stored.paid_at(), paid.paid_at());
    }

    #[tokio::test]
    async fn concurrent_changes_keep_invoice_flag() {
        let svc = service();
        let booking = propose(&svc, "3000USD").await;
        _ = svc
            .execute(ApproveContract {
                booking_id: booking.id,
            })
            .await
            .unwrap();

        let (invoiced, cancelled) = tokio::join!(
            svc.execute(invoice_due_in(booking.id, 14)),
            svc.execute(CancelBooking {
                booking_id: booking.id,
            }),
        );
        assert!(cancelled.is_ok());

        let stored = stored(&svc, booking.id).await;
        let invoice = svc
            .store()
            .read(|s| s.invoice_of(booking.id).cloned())
            .await;
        assert_eq!(stored.status(), booking::Status::Cancelled);
        assert_eq!(invoiced.is_ok(), invoice.is_some());
        assert_eq!(stored.documents().has_invoice(), invoice.is_some());
    }

    #[tokio::test]
    async fn cancelled_booking_accepts_nothing() {
        let svc = service();
        let booking = propose(&svc, "1200EUR").await;

        let cancelled = svc
            .execute(CancelBooking {
                booking_id: booking.id,
            })
            .await
            .unwrap();
        assert_eq!(cancelled.status(), booking::Status::Cancelled);

        let err = svc
            .execute(invoice_due_in(booking.id, 10))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            create_invoice::ExecutionError::IneligibleBooking(_),
        ));

        assert!(svc.execute(itinerary_of(booking.id)).await.is_err());

        let err = svc
            .execute(ApproveContract {
                booking_id: booking.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            transit_booking::ExecutionError::InvalidTransition(_),
        ));

        let stored = stored(&svc, booking.id).await;
        assert_eq!(stored.status(), booking::Status::Cancelled);
        assert_eq!(stored.documents(), booking::Documents::default());
    }

    #[tokio::test]
    async fn attaches_itinerary_until_cancelled() {
        let svc = service();
        let booking = propose(&svc, "800GBP").await;

        let booking = svc.execute(itinerary_of(booking.id)).await.unwrap();
        assert!(booking.documents().has_itinerary());

        _ = svc
            .execute(ApproveContract {
                booking_id: booking.id,
            })
            .await
            .unwrap();
        _ = svc
            .execute(CompleteBooking {
                booking_id: booking.id,
            })
            .await
            .unwrap();

        let mut replacement = itinerary_of(booking.id);
        replacement.notes = Some(itinerary::Notes::new("Encore").unwrap());
        let booking = svc.execute(replacement).await.unwrap();
        assert_eq!(booking.status(), booking::Status::Completed);

        let itinerary = svc
            .database()
            .execute(Select(By::<Option<itinerary::Itinerary>, _>::new(
                booking.id,
            )))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(itinerary.notes.unwrap().to_string(), "Encore");
    }

    #[tokio::test]
    async fn generates_single_contract() {
        let svc = service();
        let booking = propose(&svc, "5000USD").await;

        let generate = || GenerateContract {
            booking_id: booking.id,
            deposit: contract::Deposit::new("500USD".parse().unwrap()),
            deposit_due_date: None,
            special_terms: None,
        };

        let contract = svc.execute(generate()).await.unwrap();
        assert_eq!(
            contract.document_url.to_string(),
            format!("https://docs.example.com/bookings/{}/contract", booking.id),
        );
        assert!(stored(&svc, booking.id).await.documents().has_contract());

        let err = svc.execute(generate()).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            generate_contract::ExecutionError::ContractExists(_),
        ));

        let other = propose(&svc, "100USD").await;
        _ = svc
            .execute(CancelBooking {
                booking_id: other.id,
            })
            .await
            .unwrap();
        let err = svc
            .execute(GenerateContract {
                booking_id: other.id,
                deposit: None,
                deposit_due_date: None,
                special_terms: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            generate_contract::ExecutionError::IneligibleBooking(
                _,
                booking::Status::Cancelled,
            ),
        ));
    }

    #[tokio::test]
    async fn rejects_unknown_references_and_past_due_dates() {
        let svc = service();
        let booking = propose(&svc, "5000USD").await;

        let err = svc
            .execute(CreateBooking {
                artist_id: artist::Id::new(),
                promoter_id: booking.promoter_id,
                venue_id: booking.venue_id,
                date: booking.date,
                fee: booking.fee,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            create_booking::ExecutionError::ArtistNotExists(_),
        ));

        _ = svc
            .execute(ApproveContract {
                booking_id: booking.id,
            })
            .await
            .unwrap();
        let err = svc
            .execute(invoice_due_in(booking.id, -1))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            create_invoice::ExecutionError::DueDateInPast(_),
        ));
        assert!(!stored(&svc, booking.id).await.documents().has_invoice());
    }

    #[tokio::test]
    async fn failed_commit_leaves_store_untouched() {
        let svc = service();
        let booking = propose(&svc, "5000USD").await;
        let mut changes = svc.store().subscribe();

        svc.database().set_outage(Outage::Commits);
        let err = svc
            .execute(ApproveContract {
                booking_id: booking.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            transit_booking::ExecutionError::Db(_),
        ));
        assert_eq!(
            stored(&svc, booking.id).await.status(),
            booking::Status::Proposed,
        );
        assert!(changes.try_recv().is_err());

        svc.database().set_outage(Outage::None);
        let persisted = svc
            .database()
            .execute(Select(By::<Option<Booking>, _>::new(booking.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.status(), booking::Status::Proposed);
    }

    #[tokio::test]
    async fn refresh_replaces_store_contents() {
        let svc = service();
        let first = propose(&svc, "5000USD").await;
        let second = propose(&svc, "700USD").await;

        let fresh = Service {
            store: Store::new(),
            ..svc.clone()
        };
        assert!(fresh.store().snapshot().await.bookings.is_empty());

        fresh.execute(RefreshStore).await.unwrap();

        let snapshot = fresh.store().snapshot().await;
        assert_eq!(snapshot.artists.len(), 2);
        assert_eq!(
            snapshot.bookings.iter().map(|b| b.id).collect::<Vec<_>>(),
            [first.id, second.id],
        );
        assert!(snapshot.invoices.is_empty());
    }
}
