use crate::adapters::{Database, SqliteRepo};
use crate::core::prompt::ask_choice;
use crate::core::reports::{most_serviced_cars, run_report, Report};
use crate::core::{closing, intake, registry};
use crate::domain::ports::Console;
use crate::utils::error::{Result, ShopError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddCustomer,
    AddMechanic,
    AddCar,
    InsertServiceRequest,
    CloseServiceRequest,
    ListClosedRequestsWithBillLessThan100,
    ListCustomersWithMoreThan20Cars,
    ListCarsBefore1995With50000Miles,
    ListKCarsWithTheMostServices,
    ListCustomersInDescendingOrderOfTheirTotalBill,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 11] = [
        MenuChoice::AddCustomer,
        MenuChoice::AddMechanic,
        MenuChoice::AddCar,
        MenuChoice::InsertServiceRequest,
        MenuChoice::CloseServiceRequest,
        MenuChoice::ListClosedRequestsWithBillLessThan100,
        MenuChoice::ListCustomersWithMoreThan20Cars,
        MenuChoice::ListCarsBefore1995With50000Miles,
        MenuChoice::ListKCarsWithTheMostServices,
        MenuChoice::ListCustomersInDescendingOrderOfTheirTotalBill,
        MenuChoice::Exit,
    ];

    /// 1-based, as shown in the menu.
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddCustomer => "AddCustomer",
            MenuChoice::AddMechanic => "AddMechanic",
            MenuChoice::AddCar => "AddCar",
            MenuChoice::InsertServiceRequest => "InsertServiceRequest",
            MenuChoice::CloseServiceRequest => "CloseServiceRequest",
            MenuChoice::ListClosedRequestsWithBillLessThan100 => "ListClosedRequestsWithBillLessThan100",
            MenuChoice::ListCustomersWithMoreThan20Cars => "ListCustomersWithMoreThan20Cars",
            MenuChoice::ListCarsBefore1995With50000Miles => "ListCarsBefore1995With50000Miles",
            MenuChoice::ListKCarsWithTheMostServices => "ListKCarsWithTheMostServices",
            MenuChoice::ListCustomersInDescendingOrderOfTheirTotalBill => {
                "ListCustomersInDescendingOrderOfTheirTotalBill"
            }
            MenuChoice::Exit => "< EXIT",
        }
    }
}

/// The interactive front-end: one database, one console, one menu loop.
pub struct MechanicShop<C: Console> {
    db: Database,
    console: C,
}

impl<C: Console> MechanicShop<C> {
    pub fn new(db: Database, console: C) -> Self {
        Self { db, console }
    }

    pub fn into_parts(self) -> (Database, C) {
        (self.db, self.console)
    }

    /// Runs until the operator picks exit or input runs out. Store failures
    /// inside an operation are reported and the loop goes on.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let index = match ask_choice(&mut self.console, "Please make your choice: ", MenuChoice::ALL.len()) {
                Ok(index) => index,
                Err(ShopError::InputClosed) => break,
                Err(e) => return Err(e),
            };
            let Some(choice) = MenuChoice::from_index(index) else {
                continue;
            };
            if choice == MenuChoice::Exit {
                break;
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(ShopError::InputClosed) => break,
                Err(e) if e.is_recoverable() => {
                    tracing::error!("❌ {} failed: {} (Category: {:?})", choice.label(), e, e.category());
                    self.console.error(&format!("❌ {}", e.user_friendly_message()))?;
                    self.console.error(&format!("💡 {}", e.recovery_suggestion()))?;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!("👋 Session finished");
        Ok(())
    }

    /// Runs one operation in its own transaction.
    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        tracing::debug!("▶️ {}", choice.label());
        let Self { db, console } = self;
        db.in_transaction(|repo| execute(choice, repo, console))
    }

    fn print_menu(&mut self) -> Result<()> {
        self.console.say("\nMAIN MENU")?;
        self.console.say("---------")?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            self.console.say(&format!("{}. {}", i + 1, choice.label()))?;
        }
        Ok(())
    }
}

fn execute<C: Console>(choice: MenuChoice, repo: &SqliteRepo<'_>, console: &mut C) -> Result<()> {
    match choice {
        MenuChoice::AddCustomer => registry::add_customer(repo, console).map(|_| ()),
        MenuChoice::AddMechanic => registry::add_mechanic(repo, console).map(|_| ()),
        MenuChoice::AddCar => registry::add_car_interactive(repo, console).map(|_| ()),
        MenuChoice::InsertServiceRequest => intake::insert_service_request(repo, console).map(|_| ()),
        MenuChoice::CloseServiceRequest => closing::close_service_request(repo, console).map(|_| ()),
        MenuChoice::ListClosedRequestsWithBillLessThan100 => {
            run_report(repo, console, Report::ClosedRequestsBelowBill).map(|_| ())
        }
        MenuChoice::ListCustomersWithMoreThan20Cars => {
            run_report(repo, console, Report::CustomersWithManyCars).map(|_| ())
        }
        MenuChoice::ListCarsBefore1995With50000Miles => {
            run_report(repo, console, Report::OldCarsWithLowMileage).map(|_| ())
        }
        MenuChoice::ListKCarsWithTheMostServices => most_serviced_cars(repo, console).map(|_| ()),
        MenuChoice::ListCustomersInDescendingOrderOfTheirTotalBill => {
            run_report(repo, console, Report::CustomersByTotalBill).map(|_| ())
        }
        MenuChoice::Exit => Ok(()),
    }
}
